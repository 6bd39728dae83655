//! Editor session - one document with its canvas, pages, selection, and history
//!
//! The session is the single writer of its document. Each committed
//! mutation is recorded for undo; pointer moves are not.

use crate::{
    block_commands, CanvasConfig, Commit, HandleDirection, History, LayoutCanvas, MoveDirection,
    PageManager, PointPx, Result, Selection, TextDraft,
};
use doc_model::{Block, BlockId, Document, RectMm};

#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    canvas: LayoutCanvas,
    pages: PageManager,
    selection: Selection,
    history: History,
}

impl EditorSession {
    pub fn new(document: Document) -> Self {
        Self::with_canvas(document, CanvasConfig::default())
    }

    pub fn with_canvas(mut document: Document, config: CanvasConfig) -> Self {
        document.normalize();
        Self {
            document,
            canvas: LayoutCanvas::new(config),
            pages: PageManager::new(),
            selection: Selection::new(),
            history: History::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Hand the document back, discarding any interaction in progress
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn canvas(&self) -> &LayoutCanvas {
        &self.canvas
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_page(&self) -> usize {
        self.pages.active()
    }

    pub fn select_block(&mut self, id: Option<BlockId>) {
        match id {
            Some(id) if self.document.contains_block(&id) => self.selection.select(id),
            _ => self.selection.clear(),
        }
    }

    pub fn select_page(&mut self, index: usize) -> usize {
        self.pages.select(&self.document, index)
    }

    // -------------------------------------------------------------------------
    // Pointer interactions
    // -------------------------------------------------------------------------

    pub fn begin_resize(&mut self, id: &BlockId, handle: HandleDirection, pointer: PointPx) -> Result<()> {
        self.canvas.begin_resize(&self.document, id, handle, pointer)
    }

    pub fn begin_drag(&mut self, id: &BlockId, pointer: PointPx) -> Result<()> {
        self.canvas.begin_drag(&self.document, id, pointer)
    }

    pub fn pointer_move(&mut self, pointer: PointPx) -> Option<RectMm> {
        self.canvas.pointer_move(pointer)
    }

    pub fn pointer_up(&mut self) -> Option<Commit> {
        let before = self.document.clone();
        let commit = self.canvas.release(&mut self.document)?;
        self.history.record(&before);
        Some(commit)
    }

    pub fn cancel_interaction(&mut self) {
        self.canvas.cancel();
    }

    // -------------------------------------------------------------------------
    // Block and page commands
    // -------------------------------------------------------------------------

    fn commit_with<T>(&mut self, f: impl FnOnce(&mut Document, &mut PageManager) -> Result<T>) -> Result<T> {
        let before = self.document.clone();
        let out = f(&mut self.document, &mut self.pages)?;
        if self.document != before {
            self.history.record(&before);
        }
        self.selection.prune(&self.document);
        Ok(out)
    }

    /// Add a block to the active page and select it
    pub fn add_block(&mut self, block: Block) -> Result<BlockId> {
        let page = self.pages.active();
        let id = self.commit_with(|doc, _| block_commands::add_block(doc, page, block))?;
        self.selection.select(id.clone());
        Ok(id)
    }

    pub fn remove_block(&mut self, id: &BlockId) -> Result<Block> {
        self.commit_with(|doc, _| block_commands::remove_block(doc, id))
    }

    pub fn update_block(&mut self, id: &BlockId, edit: impl FnOnce(&mut Block)) -> Result<()> {
        self.commit_with(|doc, _| block_commands::update_block(doc, id, edit))
    }

    pub fn bring_to_front(&mut self, id: &BlockId) -> Result<()> {
        self.commit_with(|doc, _| block_commands::bring_to_front(doc, id))
    }

    pub fn send_to_back(&mut self, id: &BlockId) -> Result<()> {
        self.commit_with(|doc, _| block_commands::send_to_back(doc, id))
    }

    pub fn set_locked(&mut self, id: &BlockId, locked: bool) -> Result<()> {
        self.commit_with(|doc, _| block_commands::set_locked(doc, id, locked))
    }

    pub fn append_page(&mut self) -> Result<usize> {
        self.commit_with(|doc, pages| Ok(pages.append(doc)))
    }

    pub fn duplicate_page(&mut self, index: usize) -> Result<usize> {
        self.commit_with(|doc, pages| pages.duplicate(doc, index))
    }

    pub fn delete_page(&mut self, index: usize) -> Result<bool> {
        self.commit_with(|doc, pages| pages.delete(doc, index))
    }

    pub fn move_page(&mut self, index: usize, direction: MoveDirection) -> Result<bool> {
        self.commit_with(|doc, pages| pages.move_page(doc, index, direction))
    }

    // -------------------------------------------------------------------------
    // Text drafts
    // -------------------------------------------------------------------------

    pub fn begin_text_edit(&self, id: &BlockId) -> Result<TextDraft> {
        TextDraft::begin(&self.document, id)
    }

    pub fn commit_text_edit(&mut self, draft: TextDraft) -> Result<bool> {
        self.commit_with(|doc, _| draft.commit(doc))
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Undo the last commit. Not available while an interaction runs.
    pub fn undo(&mut self) -> Result<()> {
        self.canvas.cancel();
        self.history.undo(&mut self.document)?;
        self.after_history_jump();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.canvas.cancel();
        self.history.redo(&mut self.document)?;
        self.after_history_jump();
        Ok(())
    }

    fn after_history_jump(&mut self) {
        let active = self.pages.active();
        self.pages.select(&self.document, active);
        self.selection.prune(&self.document);
    }
}
