//! Render item types
//!
//! A render model is the renderer's output: every page with its bands and
//! the blocks to draw, in paint order, in scaled CSS pixels. It carries no
//! reference back to the data context.

use doc_model::{BlockId, BorderKind, HeadingLevel, HorizontalAlign, ImageFit, VerticalAlign};
use serde::{Deserialize, Serialize};

/// A rectangle in render coordinates (scaled pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Which way a document is played back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Structural placeholders only, no data
    #[default]
    Template,
    /// Bound data, conditions and signature overlays applied
    Instance,
}

/// Resolved font for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontRender {
    pub family: String,
    /// Scaled size in points
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
}

/// A table column with its share of the block width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRender {
    pub header: String,
    /// Share of the block width, 0..=1
    pub fraction: f64,
    /// Scaled width in pixels
    pub width: f64,
    pub required: bool,
}

/// Signature area content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SignatureRender {
    Signed {
        role: String,
        image_url: String,
        /// Human-readable signing time with its zone
        signed_at: String,
        /// Truncated signature hash
        hash: String,
    },
    Unsigned {
        role: String,
    },
}

/// What to draw inside an item's bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderContent {
    Header {
        text: String,
        subtitle: Option<String>,
    },
    Title {
        text: String,
        level: HeadingLevel,
    },
    /// Sanitized markup, safe to insert as-is
    RichText {
        html: String,
    },
    /// A bound field with a value: label above value
    FilledField {
        value: String,
    },
    /// A field without a value: blank line or prompt
    BlankField {
        hint: Option<String>,
        multiline: bool,
    },
    Checkbox {
        checked: bool,
    },
    Table {
        columns: Vec<ColumnRender>,
        rows: u32,
        repeater: bool,
    },
    Group {
        title: Option<String>,
    },
    Signature(SignatureRender),
    Image {
        src: String,
        fit: ImageFit,
    },
    Divider {
        /// Scaled line thickness in pixels
        thickness: f64,
    },
    Spacer,
    /// Plain text, escaped when written out
    Text {
        text: String,
    },
    /// Design-time marker; not part of instance output
    PageBreak,
}

/// One block as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    pub block_id: BlockId,
    pub bounds: Rect,
    pub z: i32,
    pub font: FontRender,
    pub align: HorizontalAlign,
    pub valign: VerticalAlign,
    pub border: BorderKind,
    /// Scaled padding in pixels
    pub padding: f64,
    pub label: Option<String>,
    pub content: RenderContent,
}

/// A header or footer band in the page margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandRender {
    pub bounds: Rect,
    pub text: String,
    pub font: FontRender,
    pub align: HorizontalAlign,
}

/// A rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRender {
    pub page_index: usize,
    pub width: f64,
    pub height: f64,
    /// Usable area inside the margins
    pub content_area: Rect,
    pub header: Option<BandRender>,
    pub footer: Option<BandRender>,
    /// "n / total" stamp, computed at render time
    pub page_number: Option<BandRender>,
    pub items: Vec<RenderItem>,
}

impl PageRender {
    pub fn item(&self, block_id: &BlockId) -> Option<&RenderItem> {
        self.items.iter().find(|item| &item.block_id == block_id)
    }
}

/// The complete render model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub mode: RenderMode,
    pub title: String,
    pub scale: f64,
    pub pages: Vec<PageRender>,
}

impl RenderModel {
    pub fn new(mode: RenderMode, title: impl Into<String>, scale: f64) -> Self {
        Self {
            mode,
            title: title.into(),
            scale,
            pages: Vec::new(),
        }
    }

    pub fn add_page(&mut self, page: PageRender) {
        self.pages.push(page);
    }

    /// Find a block's item on any page
    pub fn item(&self, block_id: &BlockId) -> Option<&RenderItem> {
        self.pages.iter().find_map(|page| page.item(block_id))
    }
}
