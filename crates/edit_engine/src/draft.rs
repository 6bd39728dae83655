//! Text drafts - in-place editing with commit-on-blur
//!
//! Keystrokes go to a local buffer. The document only changes when the
//! draft is committed at an explicit confirmation boundary (blur, Enter).
//! Dropping the draft discards it.

use crate::{EditError, Result};
use doc_model::{Block, BlockId, BlockKind, Document};

/// Editable text of a block, if its kind has one
fn editable_text(block: &Block) -> Option<&String> {
    match &block.kind {
        BlockKind::Header { text, .. } | BlockKind::Title { text, .. } => Some(text),
        BlockKind::Paragraph { html } => Some(html),
        BlockKind::DynamicText { expression } => Some(expression),
        BlockKind::Text { .. }
        | BlockKind::Number { .. }
        | BlockKind::DateTime { .. }
        | BlockKind::Checkbox { .. }
        | BlockKind::Select { .. }
        | BlockKind::Table { .. }
        | BlockKind::RepeaterTable { .. }
        | BlockKind::Group { .. }
        | BlockKind::Signature { .. }
        | BlockKind::Image { .. }
        | BlockKind::Divider { .. }
        | BlockKind::Spacer {}
        | BlockKind::PageBreak {} => None,
    }
}

fn editable_text_mut(block: &mut Block) -> Option<&mut String> {
    match &mut block.kind {
        BlockKind::Header { text, .. } | BlockKind::Title { text, .. } => Some(text),
        BlockKind::Paragraph { html } => Some(html),
        BlockKind::DynamicText { expression } => Some(expression),
        BlockKind::Text { .. }
        | BlockKind::Number { .. }
        | BlockKind::DateTime { .. }
        | BlockKind::Checkbox { .. }
        | BlockKind::Select { .. }
        | BlockKind::Table { .. }
        | BlockKind::RepeaterTable { .. }
        | BlockKind::Group { .. }
        | BlockKind::Signature { .. }
        | BlockKind::Image { .. }
        | BlockKind::Divider { .. }
        | BlockKind::Spacer {}
        | BlockKind::PageBreak {} => None,
    }
}

/// Uncommitted edit of one block's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraft {
    block_id: BlockId,
    original: String,
    buffer: String,
}

impl TextDraft {
    /// Open a draft seeded with the block's committed text
    pub fn begin(document: &Document, block_id: &BlockId) -> Result<Self> {
        let block = document
            .block(block_id)
            .ok_or_else(|| EditError::BlockNotFound(block_id.clone()))?;
        let text = editable_text(block).ok_or_else(|| EditError::NotTextEditable(block_id.clone()))?;
        Ok(Self {
            block_id: block_id.clone(),
            original: text.clone(),
            buffer: text.clone(),
        })
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.original
    }

    /// Write the buffer to the document. Returns whether anything changed.
    pub fn commit(self, document: &mut Document) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        let block = document
            .block_mut(&self.block_id)
            .ok_or_else(|| EditError::BlockNotFound(self.block_id.clone()))?;
        let slot = editable_text_mut(block).ok_or_else(|| EditError::NotTextEditable(self.block_id.clone()))?;
        *slot = self.buffer;
        tracing::debug!(block = %self.block_id, "text draft committed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(
            Block::new(BlockKind::Paragraph {
                html: "<p>Hello</p>".into(),
            })
            .with_id("p"),
        );
        doc.pages[0].blocks.push(Block::new(BlockKind::Spacer {}).with_id("s"));
        doc
    }

    #[test]
    fn test_edits_stay_local_until_commit() {
        let mut doc = doc();
        let id = BlockId::from("p");
        let mut draft = TextDraft::begin(&doc, &id).unwrap();
        draft.set_text("<p>Hello world</p>");
        assert!(draft.is_dirty());
        assert_eq!(doc.block(&id).unwrap().kind, BlockKind::Paragraph { html: "<p>Hello</p>".into() });

        assert!(draft.commit(&mut doc).unwrap());
        assert_eq!(
            doc.block(&id).unwrap().kind,
            BlockKind::Paragraph {
                html: "<p>Hello world</p>".into()
            }
        );
    }

    #[test]
    fn test_clean_draft_commits_nothing() {
        let mut doc = doc();
        let draft = TextDraft::begin(&doc, &BlockId::from("p")).unwrap();
        assert!(!draft.commit(&mut doc).unwrap());
    }

    #[test]
    fn test_non_text_block_is_rejected() {
        let doc = doc();
        assert!(matches!(
            TextDraft::begin(&doc, &BlockId::from("s")),
            Err(EditError::NotTextEditable(_))
        ));
    }

    #[test]
    fn test_commit_rejects_block_that_lost_its_text() {
        let mut doc = doc();
        let id = BlockId::from("p");
        let mut draft = TextDraft::begin(&doc, &id).unwrap();
        draft.set_text("<p>Changed</p>");
        doc.block_mut(&id).unwrap().kind = BlockKind::Divider { thickness_mm: 0.3 };

        assert!(matches!(draft.commit(&mut doc), Err(EditError::NotTextEditable(_))));
        assert_eq!(doc.block(&id).unwrap().kind, BlockKind::Divider { thickness_mm: 0.3 });
    }
}
