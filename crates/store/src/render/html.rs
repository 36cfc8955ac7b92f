//! HTML translator and print preview

use super::escape::{escape_html, sanitize_css_value};
use doc_model::{BlockKind, BlockStyle, ContentBlock, Document, ListType, TextAlign};
use layout_engine::{measured_or_estimated, paginate_with_breaks, PRINT_PAGE_HEIGHT};
use std::fmt::Write;

const QUOTE_CSS: &str = "border-left: 4px solid #ccc; padding-left: 16px; font-style: italic;";
const TABLE_CSS: &str = "border-collapse: collapse; width: 100%;";
const CELL_CSS: &str = "border: 1px solid #ccc; padding: 8px;";
const PAGE_BREAK_HTML: &str =
    "<div class=\"page-break\" style=\"page-break-before: always;\"></div>";

/// Inline CSS declarations for a block style
pub fn block_style_css(style: &BlockStyle) -> String {
    let mut css = String::new();
    let _ = write!(
        css,
        "font-size: {}px; font-weight: {}; text-align: {}; color: {}; margin-top: {}px; \
         margin-bottom: {}px; line-height: {};",
        style.font_size,
        style.font_weight.css_value(),
        style.text_align.as_str(),
        sanitize_css_value(&style.color),
        style.margin_top,
        style.margin_bottom,
        style.line_height,
    );
    if let Some(background) = &style.background_color {
        let _ = write!(css, " background-color: {};", sanitize_css_value(background));
    }
    if let Some(family) = &style.font_family {
        let _ = write!(css, " font-family: {};", sanitize_css_value(family));
    }
    if style.is_italic() {
        css.push_str(" font-style: italic;");
    }
    match (style.is_underline(), style.is_strikethrough()) {
        (true, true) => css.push_str(" text-decoration: underline line-through;"),
        (true, false) => css.push_str(" text-decoration: underline;"),
        (false, true) => css.push_str(" text-decoration: line-through;"),
        (false, false) => {}
    }
    css
}

/// ` style="..."` attribute, empty when there is nothing to emit
fn style_attr(parts: &[&str]) -> String {
    let css = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(&css))
    }
}

/// Escaped text with line breaks turned into `<br>`
fn text_with_breaks(text: &str) -> String {
    text.split('\n')
        .map(|line| escape_html(line.trim_end_matches('\r')).into_owned())
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Render one block as an HTML fragment
pub fn block_to_html(block: &ContentBlock, include_styles: bool) -> String {
    let css = if include_styles {
        block_style_css(&block.style)
    } else {
        String::new()
    };

    match &block.kind {
        BlockKind::Heading { .. } => {
            let level = block.heading_level().unwrap_or(1);
            format!(
                "<h{level}{}>{}</h{level}>",
                style_attr(&[&css]),
                escape_html(&block.content)
            )
        }
        BlockKind::Paragraph => format!(
            "<p{}>{}</p>",
            style_attr(&[&css]),
            text_with_breaks(&block.content)
        ),
        BlockKind::List { list_type } => {
            let tag = match list_type {
                ListType::Numbered => "ol",
                ListType::Bullet => "ul",
            };
            let mut html = format!("<{tag}{}>", style_attr(&[&css]));
            for item in block.list_items() {
                let _ = write!(html, "<li>{}</li>", escape_html(item));
            }
            let _ = write!(html, "</{tag}>");
            html
        }
        BlockKind::Quote => format!(
            "<blockquote{}>{}</blockquote>",
            style_attr(&[&css, QUOTE_CSS]),
            text_with_breaks(&block.content)
        ),
        BlockKind::Table { grid: None } => String::new(),
        BlockKind::Table { grid: Some(grid) } => {
            let mut html = format!("<table{}><tbody>", style_attr(&[&css, TABLE_CSS]));
            for row in grid.rows() {
                html.push_str("<tr>");
                for cell in row {
                    let _ = write!(
                        html,
                        "<td style=\"{CELL_CSS}\">{}</td>",
                        text_with_breaks(cell)
                    );
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table>");
            html
        }
        BlockKind::Divider => format!("<hr{}>", style_attr(&[&css])),
        BlockKind::PageBreak => PAGE_BREAK_HTML.to_string(),
        BlockKind::Image { url, width, height } => {
            let caption = if block.content.trim().is_empty() {
                String::new()
            } else {
                format!("<figcaption>{}</figcaption>", escape_html(&block.content))
            };
            format!(
                "<figure{}><div class=\"image-placeholder\" data-src=\"{}\" style=\"width: {width}px; \
                 height: {height}px; border: 1px dashed #9ca3af; display: flex; \
                 align-items: center; justify-content: center;\">[Image]</div>{caption}</figure>",
                style_attr(&[&css]),
                escape_html(url),
            )
        }
    }
}

/// Block fragments joined by newlines; empty fragments are skipped
pub fn render_blocks_html(blocks: &[ContentBlock], include_styles: bool) -> String {
    blocks
        .iter()
        .map(|b| block_to_html(b, include_styles))
        .filter(|html| !html.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Standalone HTML page for a document
pub fn render_document_html(document: &Document, include_styles: bool) -> String {
    let settings = &document.settings;
    let title = escape_html(&document.title);

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>\n\
         body {{ font-family: {}, sans-serif; line-height: {}; margin: {}pt; color: #333; }}\n\
         .document-title {{ text-align: center; font-size: 24px; font-weight: bold; margin-bottom: 20px; }}\n\
         @media print {{ .page-break {{ page-break-before: always; }} }}\n\
         </style>\n</head>\n<body>\n",
        sanitize_css_value(&settings.font_family),
        settings.line_spacing,
        settings.page_margins,
    );

    if !document.title.trim().is_empty() {
        let _ = writeln!(html, "<h1 class=\"document-title\">{title}</h1>");
    }
    let body = render_blocks_html(&document.blocks, include_styles);
    if !body.is_empty() {
        html.push_str(&body);
        html.push('\n');
    }
    html.push_str("</body>\n</html>\n");
    html
}

const PREVIEW_BASE_CSS: &str = "font-family: 'Times New Roman', serif; color: #000; line-height: 1.6;";
const PREVIEW_PAGE_CSS: &str = "font-family: 'Times New Roman', serif; line-height: 1.6; \
     padding: 40px; max-width: 210mm; min-height: 297mm; margin: 0 auto 40px auto; \
     background: white; color: #000; box-shadow: 0 0 10px rgba(0,0,0,0.1); \
     page-break-after: always;";

fn margin_css(style: &BlockStyle) -> String {
    let top = if style.margin_top > 0.0 { style.margin_top } else { 12.0 };
    let bottom = if style.margin_bottom > 0.0 { style.margin_bottom } else { 12.0 };
    format!("margin-top: {top}px; margin-bottom: {bottom}px;")
}

/// Print-oriented rendering of one block.
///
/// Level-1 headings are centred and deeper ones left-aligned; paragraphs
/// are justified with a first-line indent unless they ask to be centred.
pub fn block_to_print_html(block: &ContentBlock) -> String {
    let base = format!("{PREVIEW_BASE_CSS} {}", margin_css(&block.style));

    match &block.kind {
        BlockKind::Heading { .. } => {
            let level = block.heading_level().unwrap_or(1);
            let (size, align, top, bottom) = match level {
                1 => (16, "center", 30, 20),
                2 => (14, "left", 20, 15),
                _ => (13, "left", 20, 15),
            };
            format!(
                "<h{level} style=\"{PREVIEW_BASE_CSS} font-size: {size}px; font-weight: bold; \
                 text-align: {align}; margin-top: {top}px; margin-bottom: {bottom}px; \
                 page-break-after: avoid;\">{}</h{level}>",
                escape_html(&block.content)
            )
        }
        BlockKind::Paragraph => {
            let (align, indent) = if block.style.text_align == TextAlign::Center {
                ("center", "0")
            } else {
                ("justify", "0.5in")
            };
            let size = if block.style.font_size > 0.0 {
                block.style.font_size
            } else {
                12.0
            };
            format!(
                "<p style=\"{base} font-size: {size}px; text-align: {align}; text-indent: {indent};\">{}</p>",
                text_with_breaks(&block.content)
            )
        }
        BlockKind::List { list_type } => {
            let tag = match list_type {
                ListType::Numbered => "ol",
                ListType::Bullet => "ul",
            };
            let items: String = block
                .list_items()
                .into_iter()
                .map(|item| {
                    format!(
                        "<li style=\"margin-bottom: 6px; text-align: justify;\">{}</li>",
                        escape_html(item)
                    )
                })
                .collect();
            format!("<{tag} style=\"{base} padding-left: 0.5in; margin-left: 0;\">{items}</{tag}>")
        }
        BlockKind::Quote => format!(
            "<blockquote style=\"{base} padding-left: 0.5in; padding-right: 0.5in; \
             font-style: italic; text-align: justify;\">{}</blockquote>",
            text_with_breaks(&block.content)
        ),
        BlockKind::Table { grid: None } => String::new(),
        BlockKind::Table { grid: Some(grid) } => {
            let rows: String = grid
                .rows()
                .iter()
                .map(|row| {
                    let cells: String = row
                        .iter()
                        .map(|cell| {
                            format!(
                                "<td style=\"border: 1px solid #000; padding: 8px; \
                                 text-align: center; font-size: 12px;\">{}</td>",
                                escape_html(cell)
                            )
                        })
                        .collect();
                    format!("<tr>{cells}</tr>")
                })
                .collect();
            format!(
                "<table style=\"{base} border-collapse: collapse; width: 100%; \
                 border: 1px solid #000;\"><tbody>{rows}</tbody></table>"
            )
        }
        BlockKind::Divider => format!(
            "<hr style=\"{base} border: none; border-top: 1px solid #000; width: 100%;\">"
        ),
        BlockKind::PageBreak => {
            "<div style=\"page-break-before: always; height: 0; margin: 0; padding: 0;\"></div>"
                .to_string()
        }
        BlockKind::Image { .. } => format!(
            "<div style=\"{base} text-align: center; padding: 20px; page-break-inside: avoid;\">\
             <div style=\"border: 1px solid #ccc; padding: 20px; background: #f9f9f9;\">\
             <div style=\"color: #666; font-size: 12px; font-style: italic;\">Figure: {}</div>\
             </div></div>",
            escape_html(&block.content)
        ),
    }
}

/// Paged print preview: one framed `<div>` per page of at most 1122 px
pub fn render_print_preview(document: &Document) -> String {
    paginate_with_breaks(&document.blocks, PRINT_PAGE_HEIGHT, measured_or_estimated)
        .iter()
        .map(|page| {
            let content: String = page.blocks.iter().map(|b| block_to_print_html(b)).collect();
            format!("<div class=\"print-page\" style=\"{PREVIEW_PAGE_CSS}\">{content}</div>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{FontWeight, TableGrid};

    #[test]
    fn test_heading_levels_and_escaping() {
        let block = ContentBlock::heading(9, "A <b> & C");
        assert_eq!(block_to_html(&block, false), "<h6>A &lt;b&gt; &amp; C</h6>");
    }

    #[test]
    fn test_styles_are_optional() {
        let block = ContentBlock::paragraph("x")
            .with_style(BlockStyle::default().with_weight(FontWeight::Bold).with_italic(true));

        assert_eq!(block_to_html(&block, false), "<p>x</p>");
        let styled = block_to_html(&block, true);
        assert!(styled.contains("font-weight: bold;"));
        assert!(styled.contains("font-style: italic;"));
    }

    #[test]
    fn test_style_values_cannot_escape_attribute() {
        let mut block = ContentBlock::paragraph("x");
        block.style.color = "red\" onclick=\"alert(1)".to_string();
        let html = block_to_html(&block, true);
        assert!(!html.contains("onclick=\""));
    }

    #[test]
    fn test_list_items() {
        let block = ContentBlock::list(ListType::Numbered, "a\n\nb");
        assert_eq!(block_to_html(&block, false), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_paragraph_line_breaks() {
        let block = ContentBlock::paragraph("one\ntwo");
        assert_eq!(block_to_html(&block, false), "<p>one<br>two</p>");
    }

    #[test]
    fn test_table() {
        let table = ContentBlock::table(TableGrid::seed());
        let html = block_to_html(&table, false);
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains(">Cell 4</td>"));

        let uninitialized = ContentBlock::new(doc_model::BlockType::Table);
        assert_eq!(block_to_html(&uninitialized, true), "");
    }

    #[test]
    fn test_page_break_and_image() {
        assert!(block_to_html(&ContentBlock::page_break(), true)
            .contains("page-break-before: always"));

        let image = ContentBlock::image("https://x/y.png?a=1&b=2", "Figure 1");
        let html = block_to_html(&image, false);
        assert!(html.contains("data-src=\"https://x/y.png?a=1&amp;b=2\""));
        assert!(html.contains("<figcaption>Figure 1</figcaption>"));
    }

    #[test]
    fn test_document_wrapper() {
        let doc = Document::new()
            .with_title("My <Doc>")
            .with_blocks(vec![ContentBlock::paragraph("Body")]);
        let html = render_document_html(&doc, true);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My &lt;Doc&gt;</title>"));
        assert!(html.contains("<h1 class=\"document-title\">My &lt;Doc&gt;</h1>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_print_alignment_rules() {
        let h1 = block_to_print_html(&ContentBlock::heading(1, "T"));
        let h2 = block_to_print_html(&ContentBlock::heading(2, "T"));
        assert!(h1.contains("text-align: center"));
        assert!(h2.contains("text-align: left"));

        let body = block_to_print_html(&ContentBlock::paragraph("p"));
        assert!(body.contains("text-align: justify; text-indent: 0.5in"));

        let centred = ContentBlock::paragraph("p")
            .with_style(BlockStyle::default().with_align(TextAlign::Center));
        assert!(block_to_print_html(&centred).contains("text-align: center; text-indent: 0"));
    }

    #[test]
    fn test_print_preview_pages() {
        let blocks = (0..5)
            .map(|i| ContentBlock::paragraph(format!("p{i}")).with_height(500.0))
            .collect();
        let doc = Document::new().with_blocks(blocks);
        let preview = render_print_preview(&doc);
        assert_eq!(preview.matches("class=\"print-page\"").count(), 3);
    }
}
