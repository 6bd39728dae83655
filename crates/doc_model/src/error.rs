//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Page index out of range: {index} (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Document has no pages")]
    NoPages,

    #[error("Block {id} is below the minimum size: {width_mm}mm x {height_mm}mm")]
    BelowMinimumSize {
        id: String,
        width_mm: f64,
        height_mm: f64,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
