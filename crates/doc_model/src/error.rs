//! Error types for document model operations

use crate::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(BlockId),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Table cell out of range: row {row}, column {col}")]
    CellOutOfRange { row: usize, col: usize },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
