//! Escaping of user text for each target syntax

use std::borrow::Cow;

/// Escape `& < > ' "` for HTML text and attribute values
pub fn escape_html(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Escape LaTeX special characters
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape Markdown emphasis, link, entity, and HTML characters anywhere in `text`
pub fn escape_markdown_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_markdown_inline(text, &mut out);
    out
}

fn push_markdown_inline(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '&') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Escape a single line: inline characters plus line-leading markers that
/// would start a heading, list, rule, setext underline, or code fence.
///
/// Leading indentation is dropped since four spaces open a code block.
pub fn escape_markdown_line(line: &str) -> String {
    let line = line.trim_start();
    let mut out = String::with_capacity(line.len() + 4);

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let after_digits = &line[digits..];
    let rest = if line.starts_with(['#', '-', '+', '=', '~']) {
        out.push('\\');
        line
    } else if digits > 0 && is_ordered_marker(after_digits) {
        out.push_str(&line[..digits]);
        out.push('\\');
        after_digits
    } else {
        line
    };

    push_markdown_inline(rest, &mut out);
    out
}

/// `.` or `)` followed by whitespace or the end of the line
fn is_ordered_marker(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some('.' | ')')) && chars.next().map_or(true, char::is_whitespace)
}

/// Escape every line of a multi-line Markdown text
pub fn escape_markdown(text: &str) -> String {
    text.split('\n')
        .map(|line| escape_markdown_line(line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape a Markdown table cell; pipes are escaped and newlines folded
pub fn escape_markdown_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_markdown_inline(&text.replace(['\r', '\n'], " "), &mut out);
    out.replace('|', "\\|")
}

/// Keep only characters that are safe inside a CSS declaration value
pub fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '#' | '.' | '-' | ' ' | ',' | '(' | ')' | '%' | '\'')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_latex() {
        assert_eq!(escape_latex("50% of $x_1 & {y}"), "50\\% of \\$x\\_1 \\& \\{y\\}");
        assert_eq!(
            escape_latex("a\\b~c^"),
            "a\\textbackslash{}b\\textasciitilde{}c\\textasciicircum{}"
        );
    }

    #[test]
    fn test_markdown_plain_text_unchanged() {
        assert_eq!(escape_markdown("Hello world"), "Hello world");
        assert_eq!(escape_markdown("2024 was good."), "2024 was good.");
    }

    #[test]
    fn test_markdown_inline() {
        assert_eq!(escape_markdown("*bold* and [link]"), "\\*bold\\* and \\[link\\]");
    }

    #[test]
    fn test_markdown_line_starts() {
        assert_eq!(escape_markdown("# not a heading"), "\\# not a heading");
        assert_eq!(escape_markdown("- not a list"), "\\- not a list");
        assert_eq!(escape_markdown("1. not a list"), "1\\. not a list");
        assert_eq!(escape_markdown("a\n+ b"), "a\n\\+ b");
    }

    #[test]
    fn test_markdown_setext_and_rules() {
        assert_eq!(escape_markdown("Intro\n---"), "Intro\n\\---");
        assert_eq!(escape_markdown("Title\n==="), "Title\n\\===");
        assert_eq!(escape_markdown("***"), "\\*\\*\\*");
    }

    #[test]
    fn test_markdown_fences_and_indent() {
        assert_eq!(escape_markdown("~~~"), "\\~~~");
        assert_eq!(escape_markdown("```rust"), "\\`\\`\\`rust");
        assert_eq!(escape_markdown("    code"), "code");
        assert_eq!(escape_markdown("\tcode"), "code");
    }

    #[test]
    fn test_markdown_ordered_markers() {
        assert_eq!(escape_markdown("1) one"), "1\\) one");
        assert_eq!(escape_markdown("12."), "12\\.");
        assert_eq!(escape_markdown("3.14 is pi"), "3.14 is pi");
    }

    #[test]
    fn test_markdown_entities() {
        assert_eq!(escape_markdown("&copy;"), "\\&copy;");
        assert_eq!(escape_markdown("caf&eacute; & bar"), "caf\\&eacute; \\& bar");
    }

    #[test]
    fn test_markdown_cell() {
        assert_eq!(escape_markdown_cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn test_css_value() {
        assert_eq!(sanitize_css_value("#fff; background: url(x)"), "#fff background url(x)");
        assert_eq!(sanitize_css_value("'Times New Roman', serif"), "'Times New Roman', serif");
    }
}
