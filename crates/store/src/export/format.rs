//! Export formats, options and filenames

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Output formats a document can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Docx,
    Pdf,
    Html,
    Markdown,
    Latex,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Docx,
        ExportFormat::Pdf,
        ExportFormat::Html,
        ExportFormat::Markdown,
        ExportFormat::Latex,
        ExportFormat::Txt,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
            ExportFormat::Latex => "tex",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Latex => "application/x-tex",
            ExportFormat::Txt => "text/plain",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "Word Document",
            ExportFormat::Pdf => "PDF Document",
            ExportFormat::Html => "HTML Document",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Latex => "LaTeX",
            ExportFormat::Txt => "Plain Text",
        }
    }

    /// Formats that honour page breaks and a table of contents
    pub fn is_paged(&self) -> bool {
        matches!(self, ExportFormat::Docx | ExportFormat::Pdf)
    }

    /// Serialization is heavy enough to move off the async runtime
    pub fn is_binary(&self) -> bool {
        self.is_paged()
    }

    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            "html" | "htm" => Some(ExportFormat::Html),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "tex" | "latex" => Some(ExportFormat::Latex),
            "txt" | "text" => Some(ExportFormat::Txt),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::from_extension(s).ok_or_else(|| format!("Unknown export format: {s}"))
    }
}

/// What to export and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_styles: bool,
    /// Page break before every level-1 heading (docx/pdf only)
    pub page_breaks: bool,
    /// Table of contents at the start (docx/pdf only)
    pub table_of_contents: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Docx,
            include_styles: true,
            page_breaks: false,
            table_of_contents: false,
        }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_styles(mut self, include_styles: bool) -> Self {
        self.include_styles = include_styles;
        self
    }

    pub fn with_page_breaks(mut self, page_breaks: bool) -> Self {
        self.page_breaks = page_breaks;
        self
    }

    pub fn with_table_of_contents(mut self, table_of_contents: bool) -> Self {
        self.table_of_contents = table_of_contents;
        self
    }

    /// Options as they apply to `format`: the paged-only switches are
    /// cleared for formats that have no pages
    pub fn effective(&self) -> Self {
        if self.format.is_paged() {
            *self
        } else {
            Self {
                page_breaks: false,
                table_of_contents: false,
                ..*self
            }
        }
    }
}

/// Download name for a document: whitespace runs become `_`
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    static SEPARATORS: OnceLock<Option<Regex>> = OnceLock::new();

    let cleaned = title.replace(['/', '\\'], " ");
    let cleaned = cleaned.trim();
    let stem = if cleaned.is_empty() {
        "document".to_string()
    } else {
        match SEPARATORS.get_or_init(|| Regex::new(r"\s+").ok()) {
            Some(re) => re.replace_all(cleaned, "_").into_owned(),
            None => cleaned.split_whitespace().collect::<Vec<_>>().join("_"),
        }
    };
    format!("{stem}.{}", format.extension())
}

/// A finished export, ready to be handed to a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_filenames() {
        assert_eq!(export_filename("My Report", ExportFormat::Pdf), "My_Report.pdf");
        assert_eq!(export_filename("a  b\tc", ExportFormat::Markdown), "a_b_c.md");
        assert_eq!(export_filename("   ", ExportFormat::Txt), "document.txt");
        assert_eq!(export_filename(" / ", ExportFormat::Txt), "document.txt");
        assert_eq!(export_filename("../etc/x", ExportFormat::Html), ".._etc_x.html");
    }

    #[test]
    fn test_effective_options() {
        let options = ExportOptions::new(ExportFormat::Html)
            .with_page_breaks(true)
            .with_table_of_contents(true);
        let effective = options.effective();
        assert!(!effective.page_breaks);
        assert!(!effective.table_of_contents);
        assert!(effective.include_styles);

        let options = ExportOptions::new(ExportFormat::Pdf).with_page_breaks(true);
        assert!(options.effective().page_breaks);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("tex".parse::<ExportFormat>(), Ok(ExportFormat::Latex));
        assert!("odt".parse::<ExportFormat>().is_err());
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_options_serde() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"format":"latex","tableOfContents":true}"#).unwrap();
        assert_eq!(options.format, ExportFormat::Latex);
        assert!(options.include_styles);
        assert!(options.table_of_contents);
    }

    proptest! {
        #[test]
        fn prop_filename_has_no_whitespace_or_separators(title in "[ -~\t\n]{0,40}") {
            let name = export_filename(&title, ExportFormat::Docx);
            let stem = name.strip_suffix(".docx").unwrap_or_default();
            prop_assert!(!stem.is_empty());
            prop_assert!(!stem.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\'));
        }
    }
}
