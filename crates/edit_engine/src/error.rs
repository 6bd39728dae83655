//! Error types for editing operations

use doc_model::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Block is locked: {0}")]
    BlockLocked(BlockId),

    #[error("Another interaction is already in progress")]
    InteractionInProgress,

    #[error("Block has no editable text: {0}")]
    NotTextEditable(BlockId),

    #[error("Document model error: {0}")]
    DocModel(#[from] doc_model::DocModelError),

    #[error("Undo stack is empty")]
    UndoStackEmpty,

    #[error("Redo stack is empty")]
    RedoStackEmpty,
}

pub type Result<T> = std::result::Result<T, EditError>;
