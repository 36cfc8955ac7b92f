//! Plain text translator

use doc_model::{BlockKind, ContentBlock, Document, ListType};
use unicode_segmentation::UnicodeSegmentation;

/// Banner standing in for a page break
pub const TEXT_PAGE_BREAK: &str = "\n\n=== NEW PAGE ===";

fn width(text: &str) -> usize {
    text.graphemes(true).count()
}

fn underlined(text: &str, mark: char) -> String {
    let text = text.replace(['\r', '\n'], " ");
    let rule: String = std::iter::repeat(mark).take(width(&text)).collect();
    format!("{text}\n{rule}")
}

/// Render one block as plain text
pub fn block_to_text(block: &ContentBlock) -> String {
    match &block.kind {
        BlockKind::Heading { .. } => {
            let mark = if block.heading_level() == Some(1) { '=' } else { '-' };
            underlined(&block.content, mark)
        }
        BlockKind::Paragraph => block.content.clone(),
        BlockKind::List { list_type } => block
            .list_items()
            .iter()
            .enumerate()
            .map(|(i, item)| match list_type {
                ListType::Numbered => format!("{}. {item}", i + 1),
                ListType::Bullet => format!("• {item}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        BlockKind::Quote => format!("\"{}\"", block.content),
        BlockKind::Table { grid: None } => String::new(),
        BlockKind::Table { grid: Some(grid) } => {
            let mut widths = vec![0; grid.col_count()];
            for row in grid.rows() {
                for (col, cell) in row.iter().enumerate() {
                    widths[col] = widths[col].max(width(cell));
                }
            }
            grid.rows()
                .iter()
                .map(|row| {
                    row.iter()
                        .zip(&widths)
                        .map(|(cell, w)| {
                            let pad = w - width(cell);
                            format!("{cell}{}", " ".repeat(pad))
                        })
                        .collect::<Vec<_>>()
                        .join(" | ")
                        .trim_end()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        BlockKind::Divider => "---".to_string(),
        BlockKind::PageBreak => TEXT_PAGE_BREAK.to_string(),
        BlockKind::Image { .. } => format!("[Image: {}]", block.content),
    }
}

/// Every non-empty block followed by a blank line
pub fn render_blocks_text(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let text = block_to_text(block);
        if !text.is_empty() {
            out.push_str(&text);
            out.push_str("\n\n");
        }
    }
    out
}

/// Whole document, with the title underlined when present
pub fn render_document_text(document: &Document) -> String {
    let mut out = String::new();
    if !document.title.trim().is_empty() {
        out.push_str(&underlined(&document.title, '='));
        out.push_str("\n\n");
    }
    out.push_str(&render_blocks_text(&document.blocks));
    out
}
