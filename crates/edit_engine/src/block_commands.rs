//! Block commands - add, remove, restack, lock, and property edits
//!
//! Every command leaves the document invariants intact: ids stay unique and
//! blocks never drop below the minimum size.

use crate::{EditError, Result};
use doc_model::{Block, BlockId, Document};

/// Add `block` to page `page_index` on top of the existing blocks.
///
/// The block keeps its id unless the id is already used in the document,
/// in which case a fresh one is minted. Returns the id it was stored under.
pub fn add_block(document: &mut Document, page_index: usize, mut block: Block) -> Result<BlockId> {
    if document.contains_block(&block.id) {
        block.id = BlockId::new();
    }
    block.clamp_to_minimum();

    let page = document.page_mut(page_index)?;
    block.z = page.max_z().map_or(0, |z| z.saturating_add(1));
    let id = block.id.clone();
    tracing::debug!(block = %id, kind = block.kind.type_name(), page = page_index, "block added");
    page.blocks.push(block);
    Ok(id)
}

/// Remove a block and return it
pub fn remove_block(document: &mut Document, id: &BlockId) -> Result<Block> {
    let loc = document
        .find_block(id)
        .ok_or_else(|| EditError::BlockNotFound(id.clone()))?;
    let block = document.page_mut(loc.page)?.blocks.remove(loc.index);
    tracing::debug!(block = %id, "block removed");
    Ok(block)
}

/// Paint the block above every other block of its page
pub fn bring_to_front(document: &mut Document, id: &BlockId) -> Result<()> {
    let loc = document
        .find_block(id)
        .ok_or_else(|| EditError::BlockNotFound(id.clone()))?;
    let page = document.page_mut(loc.page)?;
    let top = page
        .blocks
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != loc.index)
        .map(|(_, b)| b.z)
        .max();
    if let Some(top) = top {
        page.blocks[loc.index].z = top.saturating_add(1);
    }
    Ok(())
}

/// Paint the block below every other block of its page
pub fn send_to_back(document: &mut Document, id: &BlockId) -> Result<()> {
    let loc = document
        .find_block(id)
        .ok_or_else(|| EditError::BlockNotFound(id.clone()))?;
    let page = document.page_mut(loc.page)?;
    let bottom = page
        .blocks
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != loc.index)
        .map(|(_, b)| b.z)
        .min();
    if let Some(bottom) = bottom {
        page.blocks[loc.index].z = bottom.saturating_sub(1);
    }
    Ok(())
}

pub fn set_locked(document: &mut Document, id: &BlockId, locked: bool) -> Result<()> {
    let block = document
        .block_mut(id)
        .ok_or_else(|| EditError::BlockNotFound(id.clone()))?;
    block.locked = locked;
    Ok(())
}

/// Apply an external property edit (content, style, bind, label...).
///
/// The id cannot be changed this way; the minimum size is re-applied
/// afterwards.
pub fn update_block<F>(document: &mut Document, id: &BlockId, edit: F) -> Result<()>
where
    F: FnOnce(&mut Block),
{
    let block = document
        .block_mut(id)
        .ok_or_else(|| EditError::BlockNotFound(id.clone()))?;
    edit(block);
    block.id = id.clone();
    block.clamp_to_minimum();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{BlockKind, MIN_BLOCK_WIDTH_MM};

    fn spacer(id: &str) -> Block {
        Block::new(BlockKind::Spacer {}).with_id(id)
    }

    #[test]
    fn test_add_block_stacks_on_top() {
        let mut doc = Document::new("t");
        add_block(&mut doc, 0, spacer("a")).unwrap();
        add_block(&mut doc, 0, spacer("b")).unwrap();
        let zs: Vec<i32> = doc.pages[0].blocks.iter().map(|b| b.z).collect();
        assert_eq!(zs, vec![0, 1]);
    }

    #[test]
    fn test_add_block_remints_colliding_id() {
        let mut doc = Document::new("t");
        add_block(&mut doc, 0, spacer("a")).unwrap();
        let id = add_block(&mut doc, 0, spacer("a")).unwrap();
        assert_ne!(id.as_str(), "a");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_add_block_to_missing_page() {
        let mut doc = Document::new("t");
        assert!(matches!(add_block(&mut doc, 4, spacer("a")), Err(EditError::DocModel(_))));
    }

    #[test]
    fn test_restack() {
        let mut doc = Document::new("t");
        for id in ["a", "b", "c"] {
            add_block(&mut doc, 0, spacer(id)).unwrap();
        }
        bring_to_front(&mut doc, &BlockId::from("a")).unwrap();
        let top = doc.pages[0].paint_order().last().map(|b| b.id.clone());
        assert_eq!(top, Some(BlockId::from("a")));

        send_to_back(&mut doc, &BlockId::from("c")).unwrap();
        let bottom = doc.pages[0].paint_order().first().map(|b| b.id.clone());
        assert_eq!(bottom, Some(BlockId::from("c")));
    }

    #[test]
    fn test_restack_saturates_at_z_extremes() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(spacer("max").with_z(i32::MAX));
        doc.pages[0].blocks.push(spacer("min").with_z(i32::MIN));
        doc.pages[0].blocks.push(spacer("mid"));

        bring_to_front(&mut doc, &BlockId::from("mid")).unwrap();
        assert_eq!(doc.block(&BlockId::from("mid")).unwrap().z, i32::MAX);
        send_to_back(&mut doc, &BlockId::from("mid")).unwrap();
        assert_eq!(doc.block(&BlockId::from("mid")).unwrap().z, i32::MIN);

        let id = add_block(&mut doc, 0, spacer("new")).unwrap();
        assert_eq!(doc.block(&id).unwrap().z, i32::MAX);
    }

    #[test]
    fn test_update_block_enforces_minimum() {
        let mut doc = Document::new("t");
        add_block(&mut doc, 0, spacer("a")).unwrap();
        let id = BlockId::from("a");
        update_block(&mut doc, &id, |b| {
            b.w_mm = 1.0;
            b.id = BlockId::from("hijack");
            b.label = Some("Spacer".into());
        })
        .unwrap();
        let block = doc.block(&id).unwrap();
        assert_eq!(block.w_mm, MIN_BLOCK_WIDTH_MM);
        assert_eq!(block.label.as_deref(), Some("Spacer"));
    }

    #[test]
    fn test_remove_block() {
        let mut doc = Document::new("t");
        add_block(&mut doc, 0, spacer("a")).unwrap();
        let removed = remove_block(&mut doc, &BlockId::from("a")).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert!(matches!(
            remove_block(&mut doc, &BlockId::from("a")),
            Err(EditError::BlockNotFound(_))
        ));
    }
}
