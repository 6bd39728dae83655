//! Selected block
//!
//! Selection is an explicit value owned by the editing surface and passed to
//! whatever needs it. Headless rendering never consults it.

use doc_model::{BlockId, Document};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    block: Option<BlockId>,
}

impl Selection {
    pub fn new() -> Self {
        Self { block: None }
    }

    pub fn block(&self) -> Option<&BlockId> {
        self.block.as_ref()
    }

    pub fn select(&mut self, id: BlockId) {
        self.block = Some(id);
    }

    pub fn clear(&mut self) {
        self.block = None;
    }

    pub fn is_selected(&self, id: &BlockId) -> bool {
        self.block.as_ref() == Some(id)
    }

    /// Drop the selection if its block no longer exists
    pub fn prune(&mut self, document: &Document) {
        if let Some(id) = &self.block {
            if !document.contains_block(id) {
                self.block = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Block, BlockKind};

    #[test]
    fn test_prune_clears_missing_block() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(Block::new(BlockKind::Spacer {}).with_id("a"));

        let mut selection = Selection::new();
        selection.select(BlockId::from("a"));
        selection.prune(&doc);
        assert!(selection.is_selected(&BlockId::from("a")));

        doc.pages[0].blocks.clear();
        selection.prune(&doc);
        assert_eq!(selection.block(), None);
    }
}
