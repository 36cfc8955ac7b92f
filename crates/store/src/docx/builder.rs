//! Lowering of content blocks into the DOCX object tree

use crate::docx::model::*;
use doc_model::{BlockKind, BlockStyle, ContentBlock, Document, ListType, TextAlign};
use layout_engine::{needs_forced_break, PageGeometry};

/// `w:numId` shared by every bulleted list
pub const BULLET_NUM_ID: u32 = 1;

const DIVIDER_TEXT: &str = "_______________________________________________";

/// Switches that change how a document is lowered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocxOptions {
    /// Carry block fonts, sizes, colors and emphasis into run formatting
    pub include_styles: bool,
    /// Force a page break before every level-1 heading
    pub page_breaks: bool,
    /// Emit a TOC field page after the title
    pub table_of_contents: bool,
}

fn twips(points: f32) -> u32 {
    if points.is_finite() && points > 0.0 {
        (points * 20.0).round() as u32
    } else {
        0
    }
}

fn justification(align: TextAlign) -> Justification {
    match align {
        TextAlign::Left => Justification::Left,
        TextAlign::Center => Justification::Center,
        TextAlign::Right => Justification::Right,
        TextAlign::Justify => Justification::Both,
    }
}

fn run_properties(style: &BlockStyle, include_styles: bool) -> RunProperties {
    if !include_styles {
        return RunProperties::default();
    }
    let size = (style.font_size.is_finite() && style.font_size > 0.0)
        .then(|| (style.font_size * 2.0).round() as u32);
    RunProperties {
        bold: style.font_weight.is_bold(),
        italic: style.is_italic(),
        underline: style.is_underline(),
        strike: style.is_strikethrough(),
        size,
        color: style
            .color_rgb()
            .map(|(r, g, b)| format!("{r:02X}{g:02X}{b:02X}")),
        font: style.font_family.clone(),
    }
}

fn spacing(style: &BlockStyle, include_styles: bool) -> Option<Spacing> {
    if !include_styles {
        return None;
    }
    // Block margins are CSS pixels
    let line = (style.line_height.is_finite() && style.line_height > 0.0)
        .then(|| (style.line_height * 240.0).round() as u32);
    Some(Spacing {
        before: twips(style.margin_top * 0.75),
        after: twips(style.margin_bottom * 0.75),
        line,
    })
}

/// Incremental lowering state
struct BodyBuilder {
    options: DocxOptions,
    elements: Vec<BodyElement>,
    numbered_lists: Vec<u32>,
    has_bullets: bool,
}

impl BodyBuilder {
    fn new(options: DocxOptions) -> Self {
        Self {
            options,
            elements: Vec::new(),
            numbered_lists: Vec::new(),
            has_bullets: false,
        }
    }

    fn push(&mut self, paragraph: DocxParagraph) {
        self.elements.push(BodyElement::Paragraph(paragraph));
    }

    fn next_num_id(&mut self) -> u32 {
        let id = BULLET_NUM_ID + 1 + self.numbered_lists.len() as u32;
        self.numbered_lists.push(id);
        id
    }

    fn title(&mut self, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        self.push(
            DocxParagraph::new()
                .with_style(ParagraphStyle::Title)
                .with_justification(Justification::Center)
                .with_run(RunElement::text(title)),
        );
    }

    fn table_of_contents(&mut self) {
        self.push(
            DocxParagraph::new()
                .with_style(ParagraphStyle::TocHeading)
                .with_run(RunElement::text("Table of Contents")),
        );
        self.push(DocxParagraph::new().with_run(RunElement::Field(FieldCode::TableOfContents)));
        self.push(DocxParagraph::page_break());
    }

    fn block(&mut self, block: &ContentBlock) {
        let include_styles = self.options.include_styles;
        let props = run_properties(&block.style, include_styles);
        let jc = justification(block.style.text_align);

        match &block.kind {
            BlockKind::Heading { .. } => {
                let level = block.heading_level().unwrap_or(1);
                self.push(
                    DocxParagraph::new()
                        .with_style(ParagraphStyle::Heading(level))
                        .with_justification(jc)
                        .with_run(RunElement::styled(block.content.clone(), props)),
                );
            }
            BlockKind::Paragraph => {
                let mut paragraph = DocxParagraph::new()
                    .with_justification(jc)
                    .with_run(RunElement::styled(block.content.clone(), props));
                paragraph.spacing = spacing(&block.style, include_styles);
                self.push(paragraph);
            }
            BlockKind::List { list_type } => {
                let num_id = match list_type {
                    ListType::Bullet => {
                        self.has_bullets = true;
                        BULLET_NUM_ID
                    }
                    ListType::Numbered => self.next_num_id(),
                };
                for item in block.list_items() {
                    self.push(
                        DocxParagraph::new()
                            .with_numbering(num_id)
                            .with_justification(jc)
                            .with_run(RunElement::styled(item.trim(), props.clone())),
                    );
                }
            }
            BlockKind::Quote => {
                let props = RunProperties {
                    italic: true,
                    ..props
                };
                self.push(
                    DocxParagraph::new()
                        .with_style(ParagraphStyle::Quote)
                        .with_justification(Justification::Center)
                        .with_run(RunElement::styled(format!("\"{}\"", block.content), props)),
                );
            }
            BlockKind::Table { grid: None } => {}
            BlockKind::Table { grid: Some(grid) } => {
                self.elements.push(BodyElement::Table(DocxTable {
                    rows: grid.rows().to_vec(),
                    props,
                }));
            }
            BlockKind::Divider => {
                self.push(
                    DocxParagraph::new()
                        .with_justification(Justification::Center)
                        .with_run(RunElement::text(DIVIDER_TEXT)),
                );
            }
            BlockKind::PageBreak => self.push(DocxParagraph::page_break()),
            BlockKind::Image { .. } => {
                let caption = block.content.trim();
                let label = if caption.is_empty() {
                    "[Image]".to_string()
                } else {
                    format!("[Image: {caption}]")
                };
                self.push(
                    DocxParagraph::new()
                        .with_style(ParagraphStyle::Caption)
                        .with_justification(Justification::Center)
                        .with_run(RunElement::text(label)),
                );
            }
        }
    }
}

fn section_properties(document: &Document) -> SectionProperties {
    let geometry = PageGeometry::from_settings(&document.settings);
    let non_blank = |text: &Option<String>| {
        text.as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };
    SectionProperties {
        page_width: twips(geometry.width),
        page_height: twips(geometry.height),
        landscape: geometry.width > geometry.height,
        margin: twips(geometry.margin),
        header_text: non_blank(&document.settings.header_text),
        footer_text: non_blank(&document.settings.footer_text),
    }
}

/// Lower a document into a DOCX body
pub fn build_body(document: &Document, options: &DocxOptions) -> DocxBody {
    let mut builder = BodyBuilder::new(*options);

    builder.title(&document.title);
    if options.table_of_contents {
        builder.table_of_contents();
    }

    for (index, block) in document.blocks.iter().enumerate() {
        if options.page_breaks && needs_forced_break(&document.blocks, index) {
            builder.push(DocxParagraph::page_break());
        }
        builder.block(block);
    }

    let settings = &document.settings;
    let line = if settings.line_spacing.is_finite() && settings.line_spacing > 0.0 {
        (settings.line_spacing * 240.0).round() as u32
    } else {
        240
    };

    DocxBody {
        elements: builder.elements,
        section: section_properties(document),
        defaults: DocDefaults {
            font: settings.font_family.clone(),
            line,
        },
        numbered_lists: builder.numbered_lists,
        has_bullets: builder.has_bullets,
        has_toc: options.table_of_contents,
    }
}
