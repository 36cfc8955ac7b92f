//! Export dispatch, the busy guard and delivery

use super::error::{ExportError, ExportResult};
use super::format::{export_filename, ExportArtifact, ExportFormat, ExportOptions};
use crate::docx::{export_docx_bytes, DocxOptions};
use crate::pdf::{export_pdf_bytes, PdfExportOptions};
use crate::render::{
    render_document_html, render_document_latex, render_document_markdown, render_document_text,
};
use doc_model::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Translate a document into `options.format`.
///
/// The document is only read; the paged-only switches are ignored for
/// formats without pages.
pub fn export_document(
    document: &Document,
    options: &ExportOptions,
) -> ExportResult<ExportArtifact> {
    let options = options.effective();
    let include_styles = options.include_styles;

    let bytes = match options.format {
        ExportFormat::Html => render_document_html(document, include_styles).into_bytes(),
        ExportFormat::Markdown => render_document_markdown(document, include_styles).into_bytes(),
        ExportFormat::Latex => render_document_latex(document, include_styles).into_bytes(),
        ExportFormat::Txt => render_document_text(document).into_bytes(),
        ExportFormat::Docx => export_docx_bytes(
            document,
            &DocxOptions {
                include_styles,
                page_breaks: options.page_breaks,
                table_of_contents: options.table_of_contents,
            },
        )?,
        ExportFormat::Pdf => export_pdf_bytes(
            document,
            &PdfExportOptions::default()
                .with_styles(include_styles)
                .with_page_breaks(options.page_breaks)
                .with_table_of_contents(options.table_of_contents),
        )?,
    };

    let artifact = ExportArtifact {
        filename: export_filename(&document.title, options.format),
        mime_type: options.format.mime_type(),
        bytes,
    };
    info!(
        format = %options.format,
        filename = %artifact.filename,
        bytes = artifact.bytes.len(),
        "exported document"
    );
    Ok(artifact)
}

/// Destination for finished exports
pub trait DownloadSink: Send + Sync {
    /// Store the artifact and return where it went
    fn deliver(&self, artifact: &ExportArtifact) -> std::io::Result<PathBuf>;
}

/// Writes artifacts into a directory, overwriting files of the same name
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileSink {
    fn deliver(&self, artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.filename);
        std::fs::write(&path, &artifact.bytes)?;
        debug!(path = %path.display(), "wrote export");
        Ok(path)
    }
}

/// User-facing outcome of an export request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    Success { message: String },
    Failure { message: String },
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success { message } | Notice::Failure { message } => message,
        }
    }
}

/// Clears the busy flag when dropped
pub(crate) struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs exports one at a time
#[derive(Debug, Default)]
pub struct Exporter {
    busy: AtomicBool,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn acquire(&self) -> ExportResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(&self.busy))
            .map_err(|_| ExportError::Busy)
    }

    /// Export a document; fails with [`ExportError::Busy`] while another
    /// export is running
    pub async fn export(
        &self,
        document: &Document,
        options: &ExportOptions,
    ) -> ExportResult<ExportArtifact> {
        let _guard = self.acquire()?;
        self.run(document, options).await
    }

    /// Export and hand the result to `sink`, reporting the outcome as a notice.
    ///
    /// The exporter stays busy until the sink has finished writing.
    pub async fn export_to(
        &self,
        document: &Document,
        options: &ExportOptions,
        sink: &dyn DownloadSink,
    ) -> Notice {
        let result = match self.acquire() {
            Ok(_guard) => match self.run(document, options).await {
                Ok(artifact) => sink
                    .deliver(&artifact)
                    .map(|_| artifact.filename)
                    .map_err(ExportError::from),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(filename) => Notice::Success {
                message: format!(
                    "Document exported as {} ({filename})",
                    options.format.display_name()
                ),
            },
            Err(e) => {
                warn!(error = %e, format = %options.format, "export failed");
                Notice::Failure {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Caller holds the busy guard
    async fn run(
        &self,
        document: &Document,
        options: &ExportOptions,
    ) -> ExportResult<ExportArtifact> {
        if options.format.is_binary() {
            let document = document.clone();
            let options = *options;
            tokio::task::spawn_blocking(move || export_document(&document, &options))
                .await
                .map_err(|e| ExportError::Task(e.to_string()))?
        } else {
            export_document(document, options)
        }
    }
}
