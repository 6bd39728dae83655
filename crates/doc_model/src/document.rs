//! Document - the persisted template unit
//!
//! A document is a title, page settings, and an ordered, non-empty list of
//! pages. JSON is the sole storage and transport format.

use crate::{Block, BlockId, DocModelError, Page, PageSettings, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a block lives inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation {
    pub page: usize,
    pub index: usize,
}

/// What `Document::normalize` had to repair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    /// An empty page was added to a page-less document
    pub added_page: bool,
    /// Blocks raised to the minimum size
    pub clamped_blocks: Vec<BlockId>,
    /// Duplicate ids replaced: (old, new)
    pub reminted_ids: Vec<(BlockId, BlockId)>,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        !self.added_page && self.clamped_blocks.is_empty() && self.reminted_ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub page_settings: PageSettings,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document with a single empty page
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_settings: PageSettings::default(),
            pages: vec![Page::new()],
        }
    }

    /// Parse a serialized document and repair invariant violations
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Document = serde_json::from_str(json)?;
        let report = document.normalize();
        if !report.is_clean() {
            tracing::warn!(
                added_page = report.added_page,
                clamped = report.clamped_blocks.len(),
                reminted = report.reminted_ids.len(),
                "repaired document on load"
            );
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore the document invariants in place.
    ///
    /// Guarantees at least one page, minimum block sizes, and document-wide
    /// unique block ids. The first occurrence of an id keeps it.
    pub fn normalize(&mut self) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        if self.pages.is_empty() {
            self.pages.push(Page::new());
            report.added_page = true;
        }

        let mut seen = HashSet::new();
        for page in &mut self.pages {
            for block in &mut page.blocks {
                if !block.meets_minimum_size() {
                    block.clamp_to_minimum();
                    report.clamped_blocks.push(block.id.clone());
                }
                if !seen.insert(block.id.clone()) {
                    let fresh = BlockId::new();
                    report.reminted_ids.push((block.id.clone(), fresh.clone()));
                    seen.insert(fresh.clone());
                    block.id = fresh;
                }
            }
        }

        report
    }

    /// Check the document invariants without modifying anything
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(DocModelError::NoPages);
        }

        let mut seen = HashSet::new();
        for block in self.blocks() {
            if !seen.insert(&block.id) {
                return Err(DocModelError::DuplicateBlockId(block.id.to_string()));
            }
            if !block.meets_minimum_size() {
                return Err(DocModelError::BelowMinimumSize {
                    id: block.id.to_string(),
                    width_mm: block.w_mm,
                    height_mm: block.effective_height_mm(),
                });
            }
        }

        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Result<&Page> {
        let count = self.pages.len();
        self.pages
            .get(index)
            .ok_or(DocModelError::PageOutOfRange { index, count })
    }

    pub fn page_mut(&mut self, index: usize) -> Result<&mut Page> {
        let count = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or(DocModelError::PageOutOfRange { index, count })
    }

    /// All blocks in document order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    pub fn find_block(&self, id: &BlockId) -> Option<BlockLocation> {
        self.pages.iter().enumerate().find_map(|(page, p)| {
            p.blocks
                .iter()
                .position(|b| &b.id == id)
                .map(|index| BlockLocation { page, index })
        })
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        let loc = self.find_block(id)?;
        self.pages.get(loc.page)?.blocks.get(loc.index)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        let loc = self.find_block(id)?;
        self.pages.get_mut(loc.page)?.blocks.get_mut(loc.index)
    }

    pub fn contains_block(&self, id: &BlockId) -> bool {
        self.find_block(id).is_some()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}
