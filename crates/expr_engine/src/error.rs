//! Error types for expression parsing and evaluation
//!
//! These errors never escape the public evaluation functions, which degrade
//! to an empty string (or to "visible" for conditions). They are exposed for
//! callers that want to report problems, such as a template linter.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown helper: {0}")]
    UnknownHelper(String),

    #[error("Malformed call: {0}")]
    MalformedCall(String),

    #[error("Unsupported condition: {0}")]
    UnsupportedCondition(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, ExprError>;
