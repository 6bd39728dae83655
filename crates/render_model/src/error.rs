//! Error types for rendering

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Render scale must be a positive number, got {0}")]
    InvalidScale(f64),

    #[error("Invalid signature data: {0}")]
    InvalidSignatures(#[from] serde_json::Error),

    #[error("Failed to write HTML: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
