//! Pages and page settings - margins, header/footer bands, grid, numbering
//!
//! A page is one physical A4 sheet holding an ordered list of blocks.
//! Page settings are shared by every page of a document.

use crate::{
    geometry::page_size_mm, Block, BlockId, HorizontalAlign, Orientation, PageId, PointMm, RectMm,
    SizeMm,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Margins
// =============================================================================

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(15.0)
    }
}

// =============================================================================
// Header / Footer Bands
// =============================================================================

/// A header or footer band drawn inside the top or bottom margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BandSettings {
    pub enabled: bool,
    /// Plain text; may contain `{{...}}` templates
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    pub font_size: f64,
    pub align: HorizontalAlign,
    pub height_mm: f64,
}

impl Default for BandSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            content: String::new(),
            font_family: None,
            font_size: 9.0,
            align: HorizontalAlign::Center,
            height_mm: 10.0,
        }
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Editor grid display and snapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    pub show: bool,
    pub snap: bool,
    pub step_mm: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            show: true,
            snap: true,
            step_mm: 5.0,
        }
    }
}

// =============================================================================
// Page Settings
// =============================================================================

/// Settings shared by every page of a document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub orientation: Orientation,
    pub margins: Margins,
    pub header: BandSettings,
    pub footer: BandSettings,
    /// Stamp "n / total" in the bottom margin of every page
    pub page_numbers: bool,
    pub grid: GridSettings,
}

impl PageSettings {
    pub fn page_size(&self) -> SizeMm {
        page_size_mm(self.orientation)
    }

    /// Page area minus margins.
    ///
    /// Margins that overlap collapse the area to zero rather than going negative.
    pub fn usable_area(&self) -> RectMm {
        let size = self.page_size();
        let m = &self.margins;
        RectMm::new(
            m.left,
            m.top,
            (size.width - m.left - m.right).max(0.0),
            (size.height - m.top - m.bottom).max(0.0),
        )
    }

    /// Grid step when snapping is active
    pub fn snap_step(&self) -> Option<f64> {
        (self.grid.snap && self.grid.step_mm > 0.0).then_some(self.grid.step_mm)
    }
}

// =============================================================================
// Page
// =============================================================================

/// One physical sheet. Block order is document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Minted when absent from the JSON
    #[serde(default)]
    pub id: PageId,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page with a fresh id
    pub fn new() -> Self {
        Self {
            id: PageId::new(),
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    /// Blocks in paint order: ascending z, ties by list position
    pub fn paint_order(&self) -> Vec<&Block> {
        let mut ordered: Vec<&Block> = self.blocks.iter().collect();
        // sort_by_key is stable, so list order breaks ties
        ordered.sort_by_key(|b| b.z);
        ordered
    }

    /// Topmost block under a point, the one painted last
    pub fn block_at(&self, point: PointMm) -> Option<&Block> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|b| b.rect().contains(point))
    }

    pub fn max_z(&self) -> Option<i32> {
        self.blocks.iter().map(|b| b.z).max()
    }

    pub fn min_z(&self) -> Option<i32> {
        self.blocks.iter().map(|b| b.z).min()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
