//! Store - Export, templates, persistence, and settings
//!
//! This crate turns block documents into output files (DOCX, PDF, HTML,
//! Markdown, LaTeX, plain text), materializes templates, persists
//! templates and autosave slots through a key-value store, and loads
//! editor settings.

mod autosave;
mod error;
mod file_io;
mod settings;
mod storage;
pub mod docx;
pub mod export;
pub mod pdf;
pub mod render;
pub mod templates;

pub use autosave::*;
pub use error::*;
pub use file_io::*;
pub use settings::*;
pub use storage::*;

pub use docx::{export_docx, export_docx_bytes, DocxError, DocxOptions, DocxResult};
pub use export::{
    export_document, export_filename, DownloadSink, ExportArtifact, ExportError, ExportFormat,
    ExportOptions, ExportResult, Exporter, FileSink, Notice,
};
pub use pdf::{export_pdf, export_pdf_bytes, PdfError, PdfExportOptions};
pub use templates::{TemplateError, TemplateManager, TemplateResult};
