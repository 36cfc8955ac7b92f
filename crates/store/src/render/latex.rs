//! LaTeX translator

use super::escape::escape_latex;
use doc_model::{
    BlockKind, BlockStyle, ContentBlock, Document, ListType, Orientation, PageSize, TextAlign,
};
use std::fmt::Write;

fn paper_option(size: PageSize) -> &'static str {
    match size {
        PageSize::A4 => "a4paper",
        PageSize::Letter => "letterpaper",
        PageSize::Legal => "legalpaper",
    }
}

/// Escaped text; blank lines separate paragraphs and single newlines force a line break
fn latex_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|para| {
            para.split('\n')
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(escape_latex)
                .collect::<Vec<_>>()
                .join(" \\\\\n")
        })
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn styled(text: String, style: &BlockStyle) -> String {
    if text.is_empty() {
        return text;
    }
    let mut out = text;
    if style.font_weight.is_bold() {
        out = format!("\\textbf{{{out}}}");
    }
    if style.is_italic() {
        out = format!("\\textit{{{out}}}");
    }
    if style.is_underline() {
        out = format!("\\uline{{{out}}}");
    }
    if style.is_strikethrough() {
        out = format!("\\sout{{{out}}}");
    }
    out
}

/// Print layout: only centring is honoured, everything else is the justified, indented body
fn aligned(body: String, align: TextAlign) -> String {
    match align {
        TextAlign::Center => format!("\\begin{{center}}\n{body}\n\\end{{center}}"),
        TextAlign::Left | TextAlign::Right | TextAlign::Justify => body,
    }
}

/// Render one block as LaTeX
pub fn block_to_latex(block: &ContentBlock, include_styles: bool) -> String {
    match &block.kind {
        BlockKind::Heading { .. } => {
            let command = match block.heading_level().unwrap_or(1) {
                1 => "section",
                2 => "subsection",
                _ => "subsubsection",
            };
            let title = escape_latex(&block.content.replace(['\r', '\n'], " "));
            format!("\\{command}{{{title}}}")
        }
        BlockKind::Paragraph => {
            // Styling is applied per paragraph so it never spans a \par
            let body = latex_text(&block.content)
                .split("\n\n")
                .map(|para| {
                    if include_styles {
                        styled(para.to_string(), &block.style)
                    } else {
                        para.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            aligned(body, block.style.text_align)
        }
        BlockKind::List { list_type } => {
            let env = match list_type {
                ListType::Numbered => "enumerate",
                ListType::Bullet => "itemize",
            };
            let items = block.list_items();
            if items.is_empty() {
                return String::new();
            }
            let mut out = format!("\\begin{{{env}}}\n");
            for item in items {
                let _ = writeln!(out, "  \\item {}", escape_latex(item.trim()));
            }
            let _ = write!(out, "\\end{{{env}}}");
            out
        }
        BlockKind::Quote => {
            let body = latex_text(&block.content)
                .split("\n\n")
                .map(|para| format!("\\textit{{{para}}}"))
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("\\begin{{quote}}\n{body}\n\\end{{quote}}")
        }
        BlockKind::Table { grid: None } => String::new(),
        BlockKind::Table { grid: Some(grid) } => {
            let mut out = format!(
                "\\begin{{center}}\n\\begin{{tabular}}{{|{}}}\n\\hline\n",
                "c|".repeat(grid.col_count())
            );
            for row in grid.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|c| escape_latex(&c.replace(['\r', '\n'], " ")))
                    .collect();
                let _ = write!(out, "{} \\\\\n\\hline\n", cells.join(" & "));
            }
            out.push_str("\\end{tabular}\n\\end{center}");
            out
        }
        BlockKind::Divider => "\\noindent\\rule{\\textwidth}{0.4pt}".to_string(),
        BlockKind::PageBreak => "\\newpage".to_string(),
        BlockKind::Image { width, height, .. } => {
            // Pixels to points
            let w = *width as f32 * 0.75;
            let h = *height as f32 * 0.75;
            let mut out = format!(
                "\\begin{{figure}}[h]\n  \\centering\n  \
                 \\fbox{{\\parbox[c][{h}pt][c]{{{w}pt}}{{\\centering Image placeholder}}}}\n"
            );
            let caption = block.content.trim();
            if !caption.is_empty() {
                let _ = writeln!(out, "  \\caption{{{}}}", escape_latex(caption));
            }
            out.push_str("\\end{figure}");
            out
        }
    }
}

/// Standalone LaTeX source for a document
pub fn render_document_latex(document: &Document, include_styles: bool) -> String {
    let settings = &document.settings;
    let mut geometry = format!("margin={}pt", settings.page_margins);
    if settings.page_orientation == Orientation::Landscape {
        geometry.push_str(",landscape");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "\\documentclass[{}]{{article}}",
        paper_option(settings.page_size)
    );
    let _ = writeln!(out, "\\usepackage[{geometry}]{{geometry}}");
    out.push_str("\\usepackage{graphicx}\n\\usepackage{enumitem}\n");
    out.push_str("\\usepackage{array}\n\\usepackage{longtable}\n");
    if include_styles {
        out.push_str("\\usepackage[normalem]{ulem}\n");
    }
    out.push('\n');

    let has_title = !document.title.trim().is_empty();
    if has_title {
        let _ = writeln!(out, "\\title{{{}}}", escape_latex(&document.title));
        out.push_str("\\author{}\n\\date{\\today}\n\n");
    }

    out.push_str("\\begin{document}\n");
    if has_title {
        out.push_str("\\maketitle\n");
    }
    out.push('\n');

    for block in &document.blocks {
        let latex = block_to_latex(block, include_styles);
        if !latex.is_empty() {
            out.push_str(&latex);
            out.push_str("\n\n");
        }
    }

    out.push_str("\\end{document}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{DocumentSettings, FontWeight, TableGrid};

    #[test]
    fn test_heading_commands() {
        assert_eq!(block_to_latex(&ContentBlock::heading(1, "A"), false), "\\section{A}");
        assert_eq!(block_to_latex(&ContentBlock::heading(2, "B"), false), "\\subsection{B}");
        assert_eq!(block_to_latex(&ContentBlock::heading(5, "C"), false), "\\subsubsection{C}");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let block = ContentBlock::paragraph("100% of R&D_budget");
        assert_eq!(block_to_latex(&block, false), "100\\% of R\\&D\\_budget");
    }

    #[test]
    fn test_paragraph_line_breaks() {
        let block = ContentBlock::paragraph("one\ntwo\n\nthree");
        assert_eq!(block_to_latex(&block, false), "one \\\\\ntwo\n\nthree");
    }

    #[test]
    fn test_right_aligned_paragraph_uses_body_layout() {
        let block = ContentBlock::paragraph("Signed")
            .with_style(BlockStyle::default().with_align(TextAlign::Right));
        assert_eq!(block_to_latex(&block, true), "Signed");
        assert!(!block_to_latex(&block, false).contains("flushright"));
    }

    #[test]
    fn test_centered_bold_paragraph() {
        let block = ContentBlock::paragraph("Title").with_style(
            BlockStyle::default()
                .with_align(TextAlign::Center)
                .with_weight(FontWeight::Bold),
        );
        assert_eq!(
            block_to_latex(&block, true),
            "\\begin{center}\n\\textbf{Title}\n\\end{center}"
        );
        assert_eq!(
            block_to_latex(&block, false),
            "\\begin{center}\nTitle\n\\end{center}"
        );
    }

    #[test]
    fn test_lists_and_quote() {
        let list = ContentBlock::list(ListType::Numbered, "a\nb");
        assert_eq!(
            block_to_latex(&list, false),
            "\\begin{enumerate}\n  \\item a\n  \\item b\n\\end{enumerate}"
        );

        let quote = ContentBlock::quote("wise");
        assert_eq!(
            block_to_latex(&quote, false),
            "\\begin{quote}\n\\textit{wise}\n\\end{quote}"
        );
    }

    #[test]
    fn test_table() {
        let latex = block_to_latex(&ContentBlock::table(TableGrid::seed()), false);
        assert!(latex.contains("\\begin{tabular}{|c|c|}"));
        assert!(latex.contains("Cell 1 & Cell 2 \\\\\n\\hline"));
        assert!(latex.ends_with("\\end{center}"));
    }

    #[test]
    fn test_page_break_and_divider() {
        assert_eq!(block_to_latex(&ContentBlock::page_break(), false), "\\newpage");
        assert!(block_to_latex(&ContentBlock::divider(), false).contains("\\rule"));
    }

    #[test]
    fn test_document_preamble() {
        let doc = Document::new()
            .with_title("Lab #3")
            .with_settings(DocumentSettings {
                page_size: PageSize::Letter,
                page_orientation: Orientation::Landscape,
                ..Default::default()
            })
            .with_blocks(vec![ContentBlock::paragraph("Body")]);
        let latex = render_document_latex(&doc, false);

        assert!(latex.starts_with("\\documentclass[letterpaper]{article}\n"));
        assert!(latex.contains("\\usepackage[margin=72pt,landscape]{geometry}"));
        assert!(latex.contains("\\title{Lab \\#3}"));
        assert!(latex.contains("\\maketitle\n\nBody\n\n\\end{document}"));
        assert!(!latex.contains("ulem"));
    }
}
