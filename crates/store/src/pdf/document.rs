//! PDF Document Structure
//!
//! Catalog, page tree and info dictionary.

use super::objects::{PdfDictionary, PdfObject};

/// Header version; only base-14 fonts and Flate streams are written
pub const PDF_VERSION: &str = "1.4";

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// PDF date string, `D:YYYYMMDDHHmmSS`
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self {
            creator: Some("Blockdoc".to_string()),
            producer: Some("Blockdoc PDF Export".to_string()),
            ..Default::default()
        }
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
        ];
        for (key, value) in entries {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                dict.insert(key, PdfObject::text(value));
            }
        }
        dict
    }
}

/// Format a timestamp as a PDF date string
pub fn pdf_date(time: chrono::DateTime<chrono::Utc>) -> String {
    format!("D:{}Z", time.format("%Y%m%d%H%M%S"))
}

/// Create a catalog dictionary
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Catalog");
    dict.insert("Pages", PdfObject::Reference(pages_ref));
    dict
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Pages");
    let kids = page_refs.iter().map(|&r| PdfObject::Reference(r)).collect();
    dict.insert("Kids", PdfObject::Array(kids));
    dict.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    dict
}
