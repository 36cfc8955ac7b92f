//! Markdown translator

use super::escape::{
    escape_markdown, escape_markdown_cell, escape_markdown_inline, escape_markdown_line,
};
use doc_model::{BlockKind, ContentBlock, Document, ListType};

/// Textual stand-in for a page break, which Markdown cannot express
pub const MARKDOWN_PAGE_BREAK: &str = "\n\n--- PAGE BREAK ---";

fn emphasize(text: String, block: &ContentBlock) -> String {
    if text.is_empty() {
        return text;
    }
    match (block.style.font_weight.is_bold(), block.style.is_italic()) {
        (true, true) => format!("***{text}***"),
        (true, false) => format!("**{text}**"),
        (false, true) => format!("*{text}*"),
        (false, false) => text,
    }
}

/// Render one block as Markdown; `include_styles` adds bold/italic emphasis
pub fn block_to_markdown(block: &ContentBlock, include_styles: bool) -> String {
    match &block.kind {
        BlockKind::Heading { .. } => {
            let level = block.heading_level().unwrap_or(1) as usize;
            let text = block.content.replace(['\r', '\n'], " ");
            format!("{} {}", "#".repeat(level), escape_markdown_inline(text.trim()))
        }
        BlockKind::Paragraph => {
            let text = escape_markdown(&block.content);
            if include_styles {
                emphasize(text, block)
            } else {
                text
            }
        }
        BlockKind::List { list_type } => block
            .list_items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item = escape_markdown_line(item.trim());
                match list_type {
                    ListType::Numbered => format!("{}. {item}", i + 1),
                    ListType::Bullet => format!("- {item}"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        BlockKind::Quote => {
            let text = escape_markdown(&block.content);
            let text = if include_styles {
                emphasize(text, block)
            } else {
                text
            };
            text.split('\n')
                .map(|line| format!("> {line}").trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }
        BlockKind::Table { grid: None } => String::new(),
        BlockKind::Table { grid: Some(grid) } => {
            let row_line = |row: &[String]| {
                let cells: Vec<String> = row.iter().map(|c| escape_markdown_cell(c)).collect();
                format!("| {} |", cells.join(" | "))
            };
            let mut lines = Vec::with_capacity(grid.row_count() + 1);
            for (i, row) in grid.rows().iter().enumerate() {
                lines.push(row_line(row));
                if i == 0 {
                    lines.push(format!("|{}", " --- |".repeat(grid.col_count())));
                }
            }
            lines.join("\n")
        }
        BlockKind::Divider => "---".to_string(),
        BlockKind::PageBreak => MARKDOWN_PAGE_BREAK.to_string(),
        BlockKind::Image { url, .. } => {
            let caption = escape_markdown_cell(&block.content);
            if url.trim().is_empty() {
                format!("*[Image: {caption}]*")
            } else {
                format!("![{caption}]({})", url.replace(' ', "%20").replace(')', "%29"))
            }
        }
    }
}

/// Every non-empty block followed by a blank line
pub fn render_blocks_markdown(blocks: &[ContentBlock], include_styles: bool) -> String {
    let mut out = String::new();
    for block in blocks {
        let md = block_to_markdown(block, include_styles);
        if !md.is_empty() {
            out.push_str(&md);
            out.push_str("\n\n");
        }
    }
    out
}

/// Whole document, with the title as a level-1 heading when present
pub fn render_document_markdown(document: &Document, include_styles: bool) -> String {
    let mut out = String::new();
    if !document.title.trim().is_empty() {
        out.push_str(&block_to_markdown(
            &ContentBlock::heading(1, document.title.clone()),
            false,
        ));
        out.push_str("\n\n");
    }
    out.push_str(&render_blocks_markdown(&document.blocks, include_styles));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{BlockStyle, FontWeight, TableGrid};

    #[test]
    fn test_heading_paragraph_page_break() {
        let blocks = vec![
            ContentBlock::heading(1, "Intro"),
            ContentBlock::paragraph("Hello world"),
            ContentBlock::page_break(),
        ];
        assert_eq!(
            render_blocks_markdown(&blocks, true),
            "# Intro\n\nHello world\n\n\n\n--- PAGE BREAK ---\n\n"
        );
    }

    #[test]
    fn test_numbered_list_increments() {
        let block = ContentBlock::list(ListType::Numbered, "a\nb\nc");
        assert_eq!(block_to_markdown(&block, false), "1. a\n2. b\n3. c");

        let block = ContentBlock::list(ListType::Bullet, "a\nb");
        assert_eq!(block_to_markdown(&block, false), "- a\n- b");
    }

    #[test]
    fn test_quote_prefixes_every_line() {
        let block = ContentBlock::quote("one\ntwo");
        assert_eq!(block_to_markdown(&block, false), "> one\n> two");
    }

    #[test]
    fn test_table() {
        let block = ContentBlock::table(TableGrid::seed());
        assert_eq!(
            block_to_markdown(&block, false),
            "| Cell 1 | Cell 2 |\n| --- | --- |\n| Cell 3 | Cell 4 |"
        );
    }

    #[test]
    fn test_uninitialized_table_is_skipped() {
        let blocks = vec![ContentBlock::new(doc_model::BlockType::Table)];
        assert_eq!(render_blocks_markdown(&blocks, false), "");
    }

    #[test]
    fn test_emphasis_follows_styles() {
        let block = ContentBlock::paragraph("Key point")
            .with_style(BlockStyle::default().with_weight(FontWeight::Bold));
        assert_eq!(block_to_markdown(&block, true), "**Key point**");
        assert_eq!(block_to_markdown(&block, false), "Key point");
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let block = ContentBlock::paragraph("# *not* markup");
        assert_eq!(block_to_markdown(&block, false), "\\# \\*not\\* markup");

        let heading = ContentBlock::heading(2, "C# _tips_");
        assert_eq!(block_to_markdown(&heading, false), "## C# \\_tips\\_");
    }

    #[test]
    fn test_paragraph_cannot_open_structure() {
        let setext = ContentBlock::paragraph("Intro\n---");
        assert_eq!(block_to_markdown(&setext, false), "Intro\n\\---");

        let fence = ContentBlock::paragraph("~~~");
        assert_eq!(block_to_markdown(&fence, false), "\\~~~");

        let indented = ContentBlock::paragraph("    code");
        assert_eq!(block_to_markdown(&indented, false), "code");

        let ordered = ContentBlock::paragraph("1) one");
        assert_eq!(block_to_markdown(&ordered, false), "1\\) one");

        let entity = ContentBlock::paragraph("&copy;");
        assert_eq!(block_to_markdown(&entity, false), "\\&copy;");
    }

    #[test]
    fn test_image() {
        let image = ContentBlock::image("https://x/a b.png", "Chart");
        assert_eq!(block_to_markdown(&image, false), "![Chart](https://x/a%20b.png)");

        let placeholder = ContentBlock::image("", "Chart");
        assert_eq!(block_to_markdown(&placeholder, false), "*[Image: Chart]*");
    }

    #[test]
    fn test_document_title() {
        let doc = Document::new()
            .with_title("Report")
            .with_blocks(vec![ContentBlock::divider()]);
        assert_eq!(render_document_markdown(&doc, false), "# Report\n\n---\n\n");

        let untitled = Document::new().with_title("");
        assert_eq!(render_document_markdown(&untitled, false), "");
    }
}
