//! Undo/redo history of committed document states
//!
//! Each committed mutation records the document as it was before the
//! change. Transient drag geometry is never recorded.

use crate::{EditError, Result};
use doc_model::Document;

/// Snapshot-based undo and redo stacks
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
    max_entries: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(100)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record the state preceding a commit
    pub fn record(&mut self, before: &Document) {
        self.redo_stack.clear();
        self.undo_stack.push(before.clone());
        if self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
    }

    pub fn undo(&mut self, document: &mut Document) -> Result<()> {
        let previous = self.undo_stack.pop().ok_or(EditError::UndoStackEmpty)?;
        self.redo_stack.push(std::mem::replace(document, previous));
        Ok(())
    }

    pub fn redo(&mut self, document: &mut Document) -> Result<()> {
        let next = self.redo_stack.pop().ok_or(EditError::RedoStackEmpty)?;
        self.undo_stack.push(std::mem::replace(document, next));
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        let mut doc = Document::new("v1");

        history.record(&doc);
        doc.title = "v2".into();

        history.undo(&mut doc).unwrap();
        assert_eq!(doc.title, "v1");
        history.redo(&mut doc).unwrap();
        assert_eq!(doc.title, "v2");
        assert!(matches!(history.redo(&mut doc), Err(EditError::RedoStackEmpty)));
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut history = History::new();
        let mut doc = Document::new("v1");
        history.record(&doc);
        doc.title = "v2".into();
        history.undo(&mut doc).unwrap();
        history.record(&doc);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(2);
        let mut doc = Document::new("0");
        for i in 1..=3 {
            history.record(&doc);
            doc.title = i.to_string();
        }
        history.undo(&mut doc).unwrap();
        history.undo(&mut doc).unwrap();
        assert_eq!(doc.title, "1");
        assert!(matches!(history.undo(&mut doc), Err(EditError::UndoStackEmpty)));
    }
}
