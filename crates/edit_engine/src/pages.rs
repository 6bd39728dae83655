//! Page manager - add, duplicate, move, delete and select pages
//!
//! Every operation is synchronous and leaves the active page index inside
//! the document's page range.

use crate::Result;
use doc_model::{BlockId, DocModelError, Document, Page, PageId};
use serde::{Deserialize, Serialize};

/// Direction for swapping a page with its neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards index 0
    Up,
    Down,
}

/// Tracks the active page and applies page-list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageManager {
    active: usize,
}

impl PageManager {
    pub fn new() -> Self {
        Self { active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    fn clamp(&mut self, document: &Document) {
        let last = document.page_count().saturating_sub(1);
        self.active = self.active.min(last);
    }

    /// Make `index` the active page, clamped to the page range
    pub fn select(&mut self, document: &Document, index: usize) -> usize {
        self.active = index;
        self.clamp(document);
        self.active
    }

    /// Append an empty page and make it active
    pub fn append(&mut self, document: &mut Document) -> usize {
        document.pages.push(Page::new());
        self.active = document.page_count() - 1;
        tracing::debug!(index = self.active, "page appended");
        self.active
    }

    /// Insert a deep copy of page `index` right after it and make it active.
    ///
    /// The copy gets a new page id and every block a freshly minted id.
    pub fn duplicate(&mut self, document: &mut Document, index: usize) -> Result<usize> {
        let mut copy = document.page(index)?.clone();
        copy.id = PageId::new();
        for block in &mut copy.blocks {
            block.id = BlockId::new();
        }

        let target = index + 1;
        document.pages.insert(target, copy);
        self.active = target;
        tracing::debug!(source = index, index = target, "page duplicated");
        Ok(target)
    }

    /// Delete page `index`.
    ///
    /// Returns `Ok(false)` without changing anything when the document has a
    /// single page.
    pub fn delete(&mut self, document: &mut Document, index: usize) -> Result<bool> {
        let count = document.page_count();
        if index >= count {
            return Err(DocModelError::PageOutOfRange { index, count }.into());
        }
        if count <= 1 {
            tracing::debug!("refusing to delete the last page");
            return Ok(false);
        }

        document.pages.remove(index);
        if self.active > index {
            self.active -= 1;
        }
        self.clamp(document);
        tracing::debug!(index, remaining = document.page_count(), "page deleted");
        Ok(true)
    }

    /// Swap page `index` with its neighbour.
    ///
    /// Returns `Ok(false)` when there is no neighbour in that direction. The
    /// active index follows the pages it pointed at.
    pub fn move_page(&mut self, document: &mut Document, index: usize, direction: MoveDirection) -> Result<bool> {
        let count = document.page_count();
        if index >= count {
            return Err(DocModelError::PageOutOfRange { index, count }.into());
        }

        let other = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < count => index + 1,
            _ => return Ok(false),
        };

        document.pages.swap(index, other);
        if self.active == index {
            self.active = other;
        } else if self.active == other {
            self.active = index;
        }
        tracing::debug!(from = index, to = other, "page moved");
        Ok(true)
    }
}
