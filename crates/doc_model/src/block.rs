//! Blocks - positioned document elements
//!
//! A block is one element placed on a page. Every block shares a frame
//! (id, position, size, z-order, lock, visibility condition, style, label)
//! and carries a kind-specific payload. The payload is a closed sum type;
//! consumers match on it exhaustively so that adding a kind is reviewed at
//! every site.
//!
//! ## Serialized shape
//!
//! ```json
//! { "id": "b1", "type": "text", "xMm": 15, "yMm": 40, "wMm": 80, "hMm": 12,
//!   "z": 0, "locked": false, "style": { ... }, "label": "Name", "bind": "person.name" }
//! ```

use crate::{
    BlockId, BlockStyle, EffectiveFont, RectMm, TableColumn, DEFAULT_FONT_SIZE_PT,
    MIN_BLOCK_HEIGHT_MM, MIN_BLOCK_WIDTH_MM,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Kind Parameters
// =============================================================================

/// Heading level of a title block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    #[default]
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Font size implied by the level. Manual font sizes never apply to titles.
    pub fn font_size_pt(&self) -> f64 {
        match self {
            HeadingLevel::H1 => 24.0,
            HeadingLevel::H2 => 18.0,
            HeadingLevel::H3 => 14.0,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

/// What part of a timestamp a dateTime field collects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateTimeMode {
    #[default]
    Date,
    Time,
    DateTime,
}

/// How an image fills its block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

impl ImageFit {
    pub fn as_css(&self) -> &'static str {
        match self {
            ImageFit::Contain => "contain",
            ImageFit::Cover => "cover",
            ImageFit::Fill => "fill",
        }
    }
}

// =============================================================================
// Block Kind
// =============================================================================

/// Kind-specific payload of a block, tagged by `type` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BlockKind {
    /// Document heading band with optional subtitle
    Header {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    Title {
        #[serde(default)]
        text: String,
        #[serde(default)]
        level: HeadingLevel,
    },
    /// Free-form rich text. The markup is sanitized before it is rendered.
    Paragraph {
        #[serde(default)]
        html: String,
    },
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default)]
        multiline: bool,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimals: Option<u8>,
    },
    DateTime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
        #[serde(default)]
        mode: DateTimeMode,
    },
    Checkbox {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
    },
    Select {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
        #[serde(default)]
        options: Vec<String>,
    },
    /// Fixed grid with exactly `rows` body rows
    Table {
        #[serde(default)]
        columns: Vec<TableColumn>,
        #[serde(default = "default_table_rows")]
        rows: u32,
    },
    /// Grid that grows with submitted data between `min_rows` and `max_rows`
    RepeaterTable {
        #[serde(default)]
        columns: Vec<TableColumn>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bind: Option<String>,
        #[serde(default = "default_min_rows")]
        min_rows: u32,
        #[serde(default = "default_max_rows")]
        max_rows: u32,
    },
    /// Framed area with an optional caption
    Group {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Signature {
        #[serde(default)]
        role: String,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        fit: ImageFit,
    },
    Divider {
        #[serde(default = "default_divider_thickness")]
        thickness_mm: f64,
    },
    Spacer {},
    /// Text computed from a `{{...}}` template
    DynamicText {
        #[serde(default)]
        expression: String,
    },
    PageBreak {},
}

/// Most body rows a table or repeater preview draws
pub const MAX_TABLE_ROWS: u32 = 500;

fn default_table_rows() -> u32 {
    3
}

fn default_min_rows() -> u32 {
    1
}

fn default_max_rows() -> u32 {
    10
}

fn default_divider_thickness() -> f64 {
    0.3
}

impl BlockKind {
    /// The serialized `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Header { .. } => "header",
            BlockKind::Title { .. } => "title",
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Text { .. } => "text",
            BlockKind::Number { .. } => "number",
            BlockKind::DateTime { .. } => "dateTime",
            BlockKind::Checkbox { .. } => "checkbox",
            BlockKind::Select { .. } => "select",
            BlockKind::Table { .. } => "table",
            BlockKind::RepeaterTable { .. } => "repeaterTable",
            BlockKind::Group { .. } => "group",
            BlockKind::Signature { .. } => "signature",
            BlockKind::Image { .. } => "image",
            BlockKind::Divider { .. } => "divider",
            BlockKind::Spacer {} => "spacer",
            BlockKind::DynamicText { .. } => "dynamicText",
            BlockKind::PageBreak {} => "pageBreak",
        }
    }

    /// Binding dot-path for kinds that consume one
    pub fn bind(&self) -> Option<&str> {
        match self {
            BlockKind::Text { bind, .. }
            | BlockKind::Number { bind, .. }
            | BlockKind::DateTime { bind, .. }
            | BlockKind::Checkbox { bind }
            | BlockKind::Select { bind, .. }
            | BlockKind::RepeaterTable { bind, .. } => bind.as_deref().filter(|b| !b.trim().is_empty()),
            BlockKind::Header { .. }
            | BlockKind::Title { .. }
            | BlockKind::Paragraph { .. }
            | BlockKind::Table { .. }
            | BlockKind::Group { .. }
            | BlockKind::Signature { .. }
            | BlockKind::Image { .. }
            | BlockKind::Divider { .. }
            | BlockKind::Spacer {}
            | BlockKind::DynamicText { .. }
            | BlockKind::PageBreak {} => None,
        }
    }

    /// Geometry a freshly created block of this kind gets: width and optional height
    pub fn default_size_mm(&self) -> (f64, Option<f64>) {
        match self {
            BlockKind::Header { .. } => (180.0, Some(20.0)),
            BlockKind::Title { .. } => (180.0, Some(12.0)),
            BlockKind::Paragraph { .. } => (180.0, Some(30.0)),
            BlockKind::Text { .. } => (80.0, Some(12.0)),
            BlockKind::Number { .. } => (50.0, Some(12.0)),
            BlockKind::DateTime { .. } => (50.0, Some(12.0)),
            BlockKind::Checkbox { .. } => (60.0, Some(8.0)),
            BlockKind::Select { .. } => (60.0, Some(12.0)),
            BlockKind::Table { .. } => (180.0, Some(40.0)),
            BlockKind::RepeaterTable { .. } => (180.0, Some(40.0)),
            BlockKind::Group { .. } => (180.0, Some(60.0)),
            BlockKind::Signature { .. } => (70.0, Some(30.0)),
            BlockKind::Image { .. } => (50.0, Some(40.0)),
            BlockKind::Divider { .. } => (180.0, None),
            BlockKind::Spacer {} => (180.0, Some(10.0)),
            BlockKind::DynamicText { .. } => (120.0, Some(10.0)),
            BlockKind::PageBreak {} => (180.0, None),
        }
    }
}

// =============================================================================
// Block
// =============================================================================

/// One positioned element of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    /// Left edge from the sheet's left edge, in millimetres
    pub x_mm: f64,
    /// Top edge from the sheet's top edge, in millimetres
    pub y_mm: f64,
    pub w_mm: f64,
    /// Absent for kinds sized by their content (dividers, page breaks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_mm: Option<f64>,
    /// Paint order; ties are broken by position in the page's block list
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub locked: bool,
    /// Visibility condition evaluated in instance rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<String>,
    #[serde(default)]
    pub style: BlockStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    /// Create a block with a fresh id and the kind's default geometry
    pub fn new(kind: BlockKind) -> Self {
        let (w_mm, h_mm) = kind.default_size_mm();
        Self {
            id: BlockId::new(),
            x_mm: 0.0,
            y_mm: 0.0,
            w_mm,
            h_mm,
            z: 0,
            locked: false,
            visible_if: None,
            style: BlockStyle::default(),
            label: None,
            kind,
        }
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn at(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.x_mm = x_mm;
        self.y_mm = y_mm;
        self
    }

    pub fn with_size(mut self, w_mm: f64, h_mm: Option<f64>) -> Self {
        self.w_mm = w_mm;
        self.h_mm = h_mm;
        self.clamp_to_minimum();
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_visible_if(mut self, condition: impl Into<String>) -> Self {
        self.visible_if = Some(condition.into());
        self
    }

    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Height used for layout: the stored height, or the minimum for auto-height kinds
    pub fn effective_height_mm(&self) -> f64 {
        self.h_mm.unwrap_or(MIN_BLOCK_HEIGHT_MM).max(MIN_BLOCK_HEIGHT_MM)
    }

    pub fn rect(&self) -> RectMm {
        RectMm::new(self.x_mm, self.y_mm, self.w_mm, self.effective_height_mm())
    }

    /// Raise width and height to the minimum block size.
    ///
    /// Non-finite values are replaced by the minimum as well.
    pub fn clamp_to_minimum(&mut self) {
        if !self.w_mm.is_finite() || self.w_mm < MIN_BLOCK_WIDTH_MM {
            self.w_mm = MIN_BLOCK_WIDTH_MM;
        }
        if let Some(h) = self.h_mm {
            if !h.is_finite() || h < MIN_BLOCK_HEIGHT_MM {
                self.h_mm = Some(MIN_BLOCK_HEIGHT_MM);
            }
        }
    }

    pub fn meets_minimum_size(&self) -> bool {
        self.w_mm >= MIN_BLOCK_WIDTH_MM && self.h_mm.map_or(true, |h| h >= MIN_BLOCK_HEIGHT_MM)
    }

    /// Font after kind rules are applied.
    ///
    /// Titles take their size and weight from the heading level; the manual
    /// font size is ignored and only an explicit `bold: false` removes the
    /// weight. Headers default to bold.
    pub fn effective_font(&self, default_size_pt: Option<f64>) -> EffectiveFont {
        let base_size = default_size_pt.unwrap_or(DEFAULT_FONT_SIZE_PT);
        let (size_pt, bold) = match &self.kind {
            BlockKind::Title { level, .. } => (level.font_size_pt(), self.style.bold != Some(false)),
            BlockKind::Header { .. } => (
                self.style.font_size.unwrap_or(base_size + 5.0),
                self.style.bold.unwrap_or(true),
            ),
            _ => (
                self.style.font_size.unwrap_or(base_size),
                self.style.bold.unwrap_or(false),
            ),
        };

        EffectiveFont {
            family: self.style.font_family.clone(),
            size_pt,
            bold,
            italic: self.style.italic.unwrap_or(false),
        }
    }
}
