//! PDF Export Options

use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfExportOptions {
    /// Document title for the info dictionary
    pub title: Option<String>,
    pub author: Option<String>,
    /// Flate-compress content streams
    pub compress: bool,
    /// Apply block font, weight, color and margins
    pub include_styles: bool,
    /// Start every level-1 heading after the first on a new page
    pub page_breaks: bool,
    /// Prepend a contents page listing the headings
    pub table_of_contents: bool,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            compress: true,
            include_styles: true,
            page_breaks: false,
            table_of_contents: false,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PdfExportOptions::default();
        assert!(options.compress);
        assert!(options.include_styles);
        assert!(!options.table_of_contents);
    }

    #[test]
    fn test_serde_defaults() {
        let options: PdfExportOptions =
            serde_json::from_str(r#"{"title":"Report","pageBreaks":true}"#).unwrap();
        assert_eq!(options.title.as_deref(), Some("Report"));
        assert!(options.page_breaks);
        assert!(options.compress);
    }
}
