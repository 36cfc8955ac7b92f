//! Error types for export

use crate::docx::DocxError;
use crate::pdf::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error("DOCX export failed: {0}")]
    Docx(#[from] DocxError),

    #[error("PDF export failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Could not save the export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;
