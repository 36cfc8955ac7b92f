//! Export orchestration
//!
//! Picks the translator for a requested format, serializes the document and
//! hands the artifact to a [`DownloadSink`]. Only one export runs at a time
//! per [`Exporter`].

mod error;
mod format;
mod orchestrator;

pub use error::*;
pub use format::*;
pub use orchestrator::*;
