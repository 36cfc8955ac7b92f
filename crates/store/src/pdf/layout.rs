//! Document layout for PDF output
//!
//! Blocks are grouped into pages by the paginator using estimated heights,
//! then set line by line with greedy word wrapping. A line that would cross
//! the bottom margin continues on a fresh page, so the output can have more
//! pages than the paginator produced.

use super::fonts::{estimate_text_width, StandardFont};
use super::options::PdfExportOptions;
use super::renderer::{
    LineRenderInfo, PageRenderInfo, PdfRenderItem, RectRenderInfo, RgbColor, TextRenderInfo,
};
use doc_model::{BlockKind, ContentBlock, Document, DocumentSettings, ListType, TextAlign};
use layout_engine::{measured_or_estimated, paginate_with_breaks, with_forced_breaks, PageGeometry};
use tracing::debug;

const HEADING_SIZES: [f64; 6] = [24.0, 20.0, 16.0, 14.0, 12.0, 12.0];
const BODY_SIZE: f64 = 12.0;
const TABLE_SIZE: f64 = 11.0;
const CAPTION_SIZE: f64 = 10.0;
const MARGIN_TEXT_SIZE: f64 = 9.0;
const TITLE_SIZE: f64 = 24.0;
const TOC_HEADING_SIZE: f64 = 18.0;
const LIST_INDENT: f64 = 18.0;
const QUOTE_INDENT: f64 = 12.0;
const TOC_INDENT: f64 = 12.0;
const TOC_NUMBER_WIDTH: f64 = 36.0;
const CELL_PADDING: f64 = 4.0;
const DIVIDER_HEIGHT: f64 = 12.0;

/// A heading and the page it starts on, for the contents page
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    /// Zero-based index among the body pages
    pub page: usize,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: StandardFont,
    size: f64,
    color: RgbColor,
    align: TextAlign,
    /// Multiple of `size`
    line_height: f64,
    underline: bool,
    strike: bool,
}

impl TextStyle {
    fn new(family: &str, size: f64, bold: bool, italic: bool) -> Self {
        Self {
            font: StandardFont::from_name(family, bold, italic),
            size,
            color: RgbColor::black(),
            align: TextAlign::Left,
            line_height: 1.2,
            underline: false,
            strike: false,
        }
    }

    fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn with_color(mut self, color: RgbColor) -> Self {
        self.color = color;
        self
    }

    fn line_pixels(&self) -> f64 {
        self.size * self.line_height
    }
}

/// Text style plus vertical spacing of one block
#[derive(Debug, Clone, Copy)]
struct BlockFormat {
    text: TextStyle,
    before: f64,
    after: f64,
}

fn positive(value: f32) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value as f64)
}

fn non_negative(value: f32) -> f64 {
    if value.is_finite() {
        value.max(0.0) as f64
    } else {
        0.0
    }
}

fn block_format(
    block: &ContentBlock,
    settings: &DocumentSettings,
    include_styles: bool,
) -> BlockFormat {
    let is_quote = matches!(block.kind, BlockKind::Quote);

    if include_styles {
        let style = &block.style;
        let family = style.font_family.as_deref().unwrap_or(&settings.font_family);
        let mut text = TextStyle::new(
            family,
            positive(style.font_size).unwrap_or(BODY_SIZE),
            style.font_weight.is_bold(),
            style.is_italic() || is_quote,
        )
        .with_align(style.text_align);
        if let Some((r, g, b)) = style.color_rgb() {
            text.color = RgbColor::from_u8(r, g, b);
        }
        text.line_height = positive(style.line_height).unwrap_or(1.2);
        text.underline = style.is_underline();
        text.strike = style.is_strikethrough();
        return BlockFormat {
            text,
            before: non_negative(style.margin_top),
            after: non_negative(style.margin_bottom),
        };
    }

    let family = settings.font_family.as_str();
    let body_line = positive(settings.line_spacing).unwrap_or(1.2);
    match &block.kind {
        BlockKind::Heading { level } => {
            let index = (*level).clamp(1, 6) as usize - 1;
            let align = if *level <= 1 {
                TextAlign::Center
            } else {
                TextAlign::Left
            };
            BlockFormat {
                text: TextStyle::new(family, HEADING_SIZES[index], true, false).with_align(align),
                before: 12.0,
                after: 6.0,
            }
        }
        _ => {
            let size = if matches!(block.kind, BlockKind::Table { .. }) {
                TABLE_SIZE
            } else {
                BODY_SIZE
            };
            let mut text = TextStyle::new(family, size, false, is_quote);
            text.line_height = body_line;
            BlockFormat {
                text,
                before: if is_quote { 8.0 } else { 0.0 },
                after: 8.0,
            }
        }
    }
}

/// Greedy word wrap against estimated glyph widths.
///
/// Newlines always break; a word wider than `width` is split across lines.
/// Every input line yields at least one output line.
pub fn wrap_text(text: &str, font: StandardFont, size: f64, width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if estimate_text_width(&candidate, font, size) <= width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if estimate_text_width(word, font, size) <= width {
                current = word.to_string();
            } else {
                let mut chunks = split_word(word, font, size, width);
                current = chunks.pop().unwrap_or_default();
                lines.extend(chunks);
            }
        }
        lines.push(current);
    }
    lines
}

fn split_word(word: &str, font: StandardFont, size: f64, width: f64) -> Vec<String> {
    let per_char = estimate_text_width("x", font, size);
    let fit = if per_char > 0.0 {
        ((width / per_char).floor() as usize).max(1)
    } else {
        usize::MAX
    };
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(fit).map(|chunk| chunk.iter().collect()).collect()
}

/// Cursor over the pages being filled
struct Layouter {
    width: f64,
    height: f64,
    margin: f64,
    family: String,
    pages: Vec<PageRenderInfo>,
    /// Top of the next line, from the top edge of the page
    y: f64,
}

impl Layouter {
    fn new(geometry: &PageGeometry, family: &str) -> Self {
        let mut layouter = Self {
            width: geometry.width as f64,
            height: geometry.height as f64,
            margin: geometry.margin as f64,
            family: family.to_string(),
            pages: Vec::new(),
            y: 0.0,
        };
        layouter.new_page();
        layouter
    }

    fn left(&self) -> f64 {
        self.margin
    }

    fn content_width(&self) -> f64 {
        (self.width - 2.0 * self.margin).max(1.0)
    }

    fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    fn new_page(&mut self) {
        self.pages.push(PageRenderInfo::new(self.width, self.height));
        self.y = self.margin;
    }

    fn page_index(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.margin
    }

    /// Start a new page unless `height` still fits; never leaves a page empty
    fn ensure_space(&mut self, height: f64) {
        if !self.at_page_top() && self.y + height > self.bottom() {
            self.new_page();
        }
    }

    /// Vertical gap that is dropped at the top of a page
    fn space(&mut self, amount: f64) {
        if !self.at_page_top() {
            self.y += amount;
        }
    }

    fn push(&mut self, item: PdfRenderItem) {
        if let Some(page) = self.pages.last_mut() {
            page.add_item(item);
        }
    }

    fn rule(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.push(PdfRenderItem::Line(LineRenderInfo {
            x1,
            y1,
            x2,
            y2,
            color: RgbColor::gray(),
            width,
        }));
    }

    /// Draw one line of text in the line box starting at `self.y`
    fn text_at(&mut self, text: &str, x: f64, style: &TextStyle) {
        let baseline = self.y + (style.line_pixels() - style.size) / 2.0 + style.size * 0.8;
        if text.is_empty() {
            return;
        }
        self.push(PdfRenderItem::Text(TextRenderInfo {
            text: text.to_string(),
            x,
            y: baseline,
            font: style.font,
            font_size: style.size,
            color: style.color,
        }));

        let width = estimate_text_width(text, style.font, style.size);
        let thickness = (style.size / 18.0).max(0.5);
        if style.underline {
            let y = baseline + style.size * 0.12;
            self.push(PdfRenderItem::Line(LineRenderInfo {
                x1: x,
                y1: y,
                x2: x + width,
                y2: y,
                color: style.color,
                width: thickness,
            }));
        }
        if style.strike {
            let y = baseline - style.size * 0.3;
            self.push(PdfRenderItem::Line(LineRenderInfo {
                x1: x,
                y1: y,
                x2: x + width,
                y2: y,
                color: style.color,
                width: thickness,
            }));
        }
    }

    fn aligned_x(text: &str, left: f64, width: f64, style: &TextStyle) -> f64 {
        let text_width = estimate_text_width(text, style.font, style.size);
        let x = match style.align {
            TextAlign::Center => left + (width - text_width) / 2.0,
            TextAlign::Right => left + width - text_width,
            TextAlign::Left | TextAlign::Justify => left,
        };
        x.max(left)
    }

    /// Wrap and set a paragraph; `rule_x` draws a vertical bar beside every line
    fn paragraph(
        &mut self,
        text: &str,
        left: f64,
        width: f64,
        style: &TextStyle,
        rule_x: Option<f64>,
    ) {
        let line_height = style.line_pixels();
        for line in wrap_text(text, style.font, style.size, width) {
            self.ensure_space(line_height);
            let x = Self::aligned_x(&line, left, width, style);
            self.text_at(&line, x, style);
            if let Some(rule_x) = rule_x {
                let y = self.y;
                self.rule(rule_x, y, rule_x, y + line_height, 2.0);
            }
            self.y += line_height;
        }
    }

    fn title(&mut self, title: &str) {
        if title.is_empty() {
            return;
        }
        let style =
            TextStyle::new(&self.family, TITLE_SIZE, true, false).with_align(TextAlign::Center);
        let (left, width) = (self.left(), self.content_width());
        self.paragraph(title, left, width, &style, None);
        self.y += TITLE_SIZE / 2.0;
    }

    fn block(&mut self, block: &ContentBlock, format: &BlockFormat, headings: &mut Vec<TocEntry>) {
        let style = format.text;
        let (left, width) = (self.left(), self.content_width());

        match &block.kind {
            BlockKind::PageBreak => return,
            BlockKind::Table { grid: None } => return,
            _ => {}
        }

        self.space(format.before);
        match &block.kind {
            BlockKind::Heading { level } => {
                self.ensure_space(style.line_pixels());
                headings.push(TocEntry {
                    level: *level,
                    text: block.content.trim().to_string(),
                    page: self.page_index(),
                });
                self.paragraph(&block.content, left, width, &style, None);
            }
            BlockKind::Paragraph => self.paragraph(&block.content, left, width, &style, None),
            BlockKind::Quote => self.paragraph(
                &block.content,
                left + QUOTE_INDENT,
                width - QUOTE_INDENT,
                &style,
                Some(left + 4.0),
            ),
            BlockKind::List { list_type } => self.list(block, *list_type, &style),
            BlockKind::Table { grid: Some(grid) } => self.table(grid.rows(), &style),
            BlockKind::Divider => {
                self.ensure_space(DIVIDER_HEIGHT);
                let y = self.y + DIVIDER_HEIGHT / 2.0;
                self.rule(left, y, left + width, y, 1.0);
                self.y += DIVIDER_HEIGHT;
            }
            BlockKind::Image { width: w, height: h, .. } => {
                self.image(*w as f64, *h as f64, &block.content)
            }
            BlockKind::PageBreak | BlockKind::Table { grid: None } => {}
        }
        self.y += format.after;
    }

    fn list(&mut self, block: &ContentBlock, list_type: ListType, style: &TextStyle) {
        let left = self.left();
        let width = self.content_width() - LIST_INDENT;
        let line_height = style.line_pixels();

        for (n, item) in block.list_items().into_iter().enumerate() {
            let marker = match list_type {
                ListType::Bullet => "\u{2022}".to_string(),
                ListType::Numbered => format!("{}.", n + 1),
            };
            for (i, line) in wrap_text(item, style.font, style.size, width)
                .into_iter()
                .enumerate()
            {
                self.ensure_space(line_height);
                if i == 0 {
                    self.text_at(&marker, left, style);
                }
                self.text_at(&line, left + LIST_INDENT, style);
                self.y += line_height;
            }
        }
    }

    fn table(&mut self, rows: &[Vec<String>], style: &TextStyle) {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if cols == 0 {
            return;
        }
        let left = self.left();
        let col_width = self.content_width() / cols as f64;
        let text_width = (col_width - 2.0 * CELL_PADDING).max(1.0);
        let line_height = style.line_pixels();

        for row in rows {
            let cells: Vec<Vec<String>> = row
                .iter()
                .map(|cell| wrap_text(cell, style.font, style.size, text_width))
                .collect();
            let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let row_height = lines as f64 * line_height + 2.0 * CELL_PADDING;
            self.ensure_space(row_height);

            let top = self.y;
            for col in 0..cols {
                let x = left + col as f64 * col_width;
                self.push(PdfRenderItem::Rectangle(RectRenderInfo {
                    x,
                    y: top,
                    width: col_width,
                    height: row_height,
                    fill: None,
                    stroke: Some(RgbColor::black()),
                    stroke_width: 0.5,
                }));
                if let Some(cell_lines) = cells.get(col) {
                    for (i, line) in cell_lines.iter().enumerate() {
                        self.y = top + CELL_PADDING + i as f64 * line_height;
                        let text_x = Self::aligned_x(line, x + CELL_PADDING, text_width, style);
                        self.text_at(line, text_x, style);
                    }
                }
            }
            self.y = top + row_height;
        }
    }

    fn image(&mut self, image_width: f64, image_height: f64, caption: &str) {
        let available_width = self.content_width();
        let available_height = (self.bottom() - self.margin).max(1.0);
        let (mut w, mut h) = (image_width.max(1.0), image_height.max(1.0));
        let scale = (available_width / w).min(available_height / h).min(1.0);
        w *= scale;
        h *= scale;

        self.ensure_space(h);
        let x = self.left() + (available_width - w) / 2.0;
        let top = self.y;
        self.push(PdfRenderItem::Rectangle(RectRenderInfo {
            x,
            y: top,
            width: w,
            height: h,
            fill: None,
            stroke: Some(RgbColor::gray()),
            stroke_width: 1.0,
        }));

        let label = TextStyle::new(&self.family, CAPTION_SIZE, false, false)
            .with_align(TextAlign::Center)
            .with_color(RgbColor::gray());
        self.y = top + (h - label.line_pixels()) / 2.0;
        let label_x = Self::aligned_x("[Image]", x, w, &label);
        self.text_at("[Image]", label_x, &label);
        self.y = top + h;

        let caption = caption.trim();
        if !caption.is_empty() {
            let style = TextStyle::new(&self.family, CAPTION_SIZE, false, true)
                .with_align(TextAlign::Center);
            self.y += 4.0;
            let (left, width) = (self.left(), self.content_width());
            self.paragraph(caption, left, width, &style, None);
        }
    }

    fn finish(self) -> Vec<PageRenderInfo> {
        self.pages
    }
}

/// Contents pages listing `entries`; body page numbers are shifted by `page_offset`
fn layout_toc(
    geometry: &PageGeometry,
    family: &str,
    title: &str,
    entries: &[TocEntry],
    page_offset: usize,
) -> Vec<PageRenderInfo> {
    let mut layouter = Layouter::new(geometry, family);
    layouter.title(title);

    let heading = TextStyle::new(family, TOC_HEADING_SIZE, true, false);
    let (left, width) = (layouter.left(), layouter.content_width());
    layouter.paragraph("Table of Contents", left, width, &heading, None);
    layouter.y += 6.0;

    for entry in entries {
        let style = TextStyle::new(family, BODY_SIZE, entry.level <= 1, false);
        let indent = (entry.level.clamp(1, 6) - 1) as f64 * TOC_INDENT;
        let text_width = (width - indent - TOC_NUMBER_WIDTH).max(1.0);
        let number = (entry.page + page_offset + 1).to_string();

        for (i, line) in wrap_text(&entry.text, style.font, style.size, text_width)
            .into_iter()
            .enumerate()
        {
            layouter.ensure_space(style.line_pixels());
            layouter.text_at(&line, left + indent, &style);
            if i == 0 {
                let x = left + width - estimate_text_width(&number, style.font, style.size);
                layouter.text_at(&number, x, &style);
            }
            layouter.y += style.line_pixels();
        }
    }

    layouter.finish()
}

/// Header text, footer text and the page number in the page margins
fn decorate(pages: &mut [PageRenderInfo], geometry: &PageGeometry, settings: &DocumentSettings) {
    let family = settings.font_family.as_str();
    let style = TextStyle::new(family, MARGIN_TEXT_SIZE, false, false).with_color(RgbColor::gray());
    let margin = geometry.margin as f64;
    let width = geometry.width as f64;
    let height = geometry.height as f64;
    let header_y = (margin / 2.0).max(MARGIN_TEXT_SIZE) + MARGIN_TEXT_SIZE * 0.35;
    let footer_y = height - (margin / 2.0).max(MARGIN_TEXT_SIZE);
    let side = margin.max(MARGIN_TEXT_SIZE);

    let header = settings.header_text.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let footer = settings.footer_text.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let text = |text: &str, x: f64, y: f64| {
        PdfRenderItem::Text(TextRenderInfo {
            text: text.to_string(),
            x,
            y,
            font: style.font,
            font_size: style.size,
            color: style.color,
        })
    };

    for (index, page) in pages.iter_mut().enumerate() {
        if let Some(header) = header {
            let x = ((width - estimate_text_width(header, style.font, style.size)) / 2.0).max(0.0);
            page.add_item(text(header, x, header_y));
        }
        if let Some(footer) = footer {
            page.add_item(text(footer, side, footer_y));
        }
        let number = (index + 1).to_string();
        let x = width - side - estimate_text_width(&number, style.font, style.size);
        page.add_item(text(&number, x, footer_y));
    }
}

/// Lay out a whole document into pages ready for rendering
pub fn layout_document(document: &Document, options: &PdfExportOptions) -> Vec<PageRenderInfo> {
    let settings = &document.settings;
    let geometry = PageGeometry::from_settings(settings);
    let title = document.title.trim();

    let blocks = if options.page_breaks {
        with_forced_breaks(&document.blocks)
    } else {
        document.blocks.clone()
    };
    let groups = paginate_with_breaks(&blocks, geometry.content_height(), measured_or_estimated);

    let mut body = Layouter::new(&geometry, &settings.font_family);
    if !options.table_of_contents {
        body.title(title);
    }

    let mut headings = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 && !body.at_page_top() {
            body.new_page();
        }
        for block in &group.blocks {
            let format = block_format(block, settings, options.include_styles);
            body.block(block, &format, &mut headings);
        }
    }
    let mut pages = body.finish();

    if options.table_of_contents {
        let toc_pages = layout_toc(&geometry, &settings.font_family, title, &headings, 0).len();
        let mut toc = layout_toc(&geometry, &settings.font_family, title, &headings, toc_pages);
        toc.append(&mut pages);
        pages = toc;
    }

    decorate(&mut pages, &geometry, settings);
    debug!(
        groups = groups.len(),
        pages = pages.len(),
        headings = headings.len(),
        "laid out PDF pages"
    );
    pages
}
