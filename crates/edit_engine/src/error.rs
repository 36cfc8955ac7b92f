//! Error types for editing operations

use doc_model::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Block {0} is not a table")]
    NotATable(BlockId),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;
