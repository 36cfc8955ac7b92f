//! Page Model to PDF Conversion
//!
//! Layout produces [`PageRenderInfo`] values in top-down page coordinates;
//! [`PdfRenderer`] turns each into a content stream, flipping y for PDF.

use super::content::ContentStream;
use super::fonts::{FontManager, StandardFont};

/// A color in RGB format (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn gray() -> Self {
        Self::new(0.6, 0.6, 0.6)
    }
}

/// A single line of text
#[derive(Debug, Clone)]
pub struct TextRenderInfo {
    pub text: String,
    /// X position in points from the left edge
    pub x: f64,
    /// Baseline in points from the top edge
    pub y: f64,
    pub font: StandardFont,
    pub font_size: f64,
    pub color: RgbColor,
}

#[derive(Debug, Clone, Copy)]
pub struct LineRenderInfo {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: RgbColor,
    pub width: f64,
}

/// Rectangle with its top-left corner at (`x`, `y`)
#[derive(Debug, Clone, Copy)]
pub struct RectRenderInfo {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<RgbColor>,
    pub stroke: Option<RgbColor>,
    pub stroke_width: f64,
}

#[derive(Debug, Clone)]
pub enum PdfRenderItem {
    Text(TextRenderInfo),
    Line(LineRenderInfo),
    Rectangle(RectRenderInfo),
}

/// Everything drawn on one page
#[derive(Debug, Clone)]
pub struct PageRenderInfo {
    pub width: f64,
    pub height: f64,
    pub items: Vec<PdfRenderItem>,
}

impl PageRenderInfo {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: PdfRenderItem) {
        self.items.push(item);
    }

    /// Text of every text item, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PdfRenderItem::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }
}

/// PDF page renderer
#[derive(Debug, Default)]
pub struct PdfRenderer {
    font_manager: FontManager,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fonts referenced by the pages rendered so far
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }

    /// Render a page to a content stream
    pub fn render_page(&mut self, page_info: &PageRenderInfo) -> ContentStream {
        let mut content = ContentStream::new();
        let page_height = page_info.height;

        // Graphics go first so text is drawn on top
        for item in &page_info.items {
            match item {
                PdfRenderItem::Rectangle(rect) => render_rectangle(&mut content, rect, page_height),
                PdfRenderItem::Line(line) => render_line(&mut content, line, page_height),
                PdfRenderItem::Text(_) => {}
            }
        }

        let mut texts = page_info
            .items
            .iter()
            .filter_map(|item| match item {
                PdfRenderItem::Text(text) => Some(text),
                _ => None,
            })
            .peekable();

        if texts.peek().is_some() {
            content.begin_text();

            let mut current_font: Option<(String, f64)> = None;
            let mut current_color: Option<RgbColor> = None;

            for text in texts {
                let font_name = self.font_manager.resource_name(text.font);
                let should_update_font = match &current_font {
                    Some((name, size)) => *name != font_name || *size != text.font_size,
                    None => true,
                };
                if should_update_font {
                    content.set_font(&font_name, text.font_size);
                    current_font = Some((font_name, text.font_size));
                }

                if current_color != Some(text.color) {
                    content.set_fill_rgb(text.color.r, text.color.g, text.color.b);
                    current_color = Some(text.color);
                }

                content.set_text_position(text.x, page_height - text.y);
                content.show_text(&text.text);
            }

            content.end_text();
        }

        content
    }
}

fn render_rectangle(content: &mut ContentStream, rect: &RectRenderInfo, page_height: f64) {
    content.save_state();
    let pdf_y = page_height - rect.y - rect.height;

    if let Some(fill) = rect.fill {
        content.set_fill_rgb(fill.r, fill.g, fill.b);
    }
    if let Some(stroke) = rect.stroke {
        content.set_stroke_rgb(stroke.r, stroke.g, stroke.b);
        content.set_line_width(rect.stroke_width);
    }

    content.rect(rect.x, pdf_y, rect.width, rect.height);

    match (rect.fill.is_some(), rect.stroke.is_some()) {
        (true, true) => content.fill_and_stroke(),
        (true, false) => content.fill(),
        (false, true) => content.stroke(),
        (false, false) => content.end_path(),
    };

    content.restore_state();
}

fn render_line(content: &mut ContentStream, line: &LineRenderInfo, page_height: f64) {
    content.save_state();
    content.set_stroke_rgb(line.color.r, line.color.g, line.color.b);
    content.set_line_width(line.width);
    content.move_to(line.x1, page_height - line.y1);
    content.line_to(line.x2, page_height - line.y2);
    content.stroke();
    content.restore_state();
}
