//! DOCX Export Module
//!
//! A DOCX file is a ZIP archive containing XML files:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Main document content
//! - `word/styles.xml` - Style definitions
//! - `word/numbering.xml` - List definitions, when the document has lists
//! - `word/settings.xml` - Document settings
//! - `word/header1.xml`, `word/footer1.xml` - Header and footer, when set
//! - `word/_rels/document.xml.rels` - Document relationships
//!
//! Blocks are lowered into a [`DocxBody`] first and then serialized.

mod builder;
mod content_types;
mod document_writer;
mod error;
mod model;
mod numbering_writer;
mod relationships;
mod styles_writer;
mod writer;


pub use builder::{build_body, DocxOptions, BULLET_NUM_ID};
pub use error::{DocxError, DocxResult};
pub use model::*;
pub use writer::DocxWriter;

use doc_model::Document;
use std::io::Cursor;
use std::path::Path;

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const NUMBERING: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const FOOTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const NUMBERING: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const HEADER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
    pub const FOOTER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// Serialize a document into DOCX bytes
pub fn export_docx_bytes(document: &Document, options: &DocxOptions) -> DocxResult<Vec<u8>> {
    let body = build_body(document, options);
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(&body)?;
    Ok(cursor.into_inner())
}

/// Serialize a document into a DOCX file at `path`
pub fn export_docx(
    document: &Document,
    path: impl AsRef<Path>,
    options: &DocxOptions,
) -> DocxResult<()> {
    let bytes = export_docx_bytes(document, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
