//! PDF Export Module
//!
//! Native vector PDF output for block documents, drawn with the standard
//! Type1 fonts.
//!
//! # Architecture
//!
//! - `layout`: sets blocks onto pages (wrapping, tables, contents page)
//! - `renderer`: converts laid-out pages to content streams
//! - `content`: content stream operators
//! - `fonts`: standard font selection and metrics
//! - `objects`: PDF object model and serialization
//! - `document`: catalog, page tree and info dictionary
//! - `writer`: file structure and cross-reference table

mod content;
mod document;
mod fonts;
mod layout;
mod objects;
mod options;
mod renderer;
mod writer;

pub use document::DocumentInfo;
pub use fonts::StandardFont;
pub use layout::{layout_document, wrap_text, TocEntry};
pub use options::*;
pub use renderer::{PageRenderInfo, PdfRenderItem, RgbColor};
pub use writer::{PdfError, Result};

use doc_model::Document;
use std::path::Path;
use writer::PdfDocumentWriter;

/// Render a document to PDF bytes
pub fn export_pdf_bytes(document: &Document, options: &PdfExportOptions) -> Result<Vec<u8>> {
    let pages = layout_document(document, options);

    let mut info = DocumentInfo::new();
    info.title = options
        .title
        .clone()
        .or_else(|| Some(document.title.clone()));
    info.author = options.author.clone();
    info.creation_date = Some(document::pdf_date(chrono::Utc::now()));

    PdfDocumentWriter::new(info, options.compress).write_to_bytes(&pages)
}

/// Render a document to a PDF file at `path`
pub fn export_pdf(
    document: &Document,
    path: impl AsRef<Path>,
    options: &PdfExportOptions,
) -> Result<()> {
    let bytes = export_pdf_bytes(document, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
