//! Error types for template operations

use doc_model::TemplateId;
use thiserror::Error;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing or invalid user input; the message is shown as-is
    #[error("{0}")]
    Validation(String),

    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(TemplateId),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backing store failed (unavailable, quota exceeded)
    #[error("Template storage error: {0}")]
    Storage(#[from] crate::StoreError),
}

impl TemplateError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for template operations
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
