//! Block styling

use serde::{Deserialize, Serialize};

/// Font size used when neither the block nor the renderer config sets one
pub const DEFAULT_FONT_SIZE_PT: f64 = 11.0;

/// Horizontal alignment of block content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Justify => "justify",
        }
    }
}

/// Vertical alignment of block content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    /// Flexbox `justify-content` value for a column layout
    pub fn as_css(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "flex-start",
            VerticalAlign::Middle => "center",
            VerticalAlign::Bottom => "flex-end",
        }
    }
}

/// Border drawn around a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
}

impl BorderKind {
    pub fn as_css(&self) -> Option<&'static str> {
        match self {
            BorderKind::None => None,
            BorderKind::Solid => Some("solid"),
            BorderKind::Dashed => Some("dashed"),
            BorderKind::Dotted => Some("dotted"),
        }
    }
}

/// Style shared by every block kind.
///
/// Optional font properties fall back to the renderer defaults. `bold` is
/// tri-state so that an explicit `false` can override a title's implied weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    /// Font family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    pub align: HorizontalAlign,
    pub valign: VerticalAlign,
    pub border: BorderKind,
    /// Inner padding in millimetres
    pub padding_mm: f64,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: None,
            bold: None,
            italic: None,
            align: HorizontalAlign::Left,
            valign: VerticalAlign::Top,
            border: BorderKind::None,
            padding_mm: 1.0,
        }
    }
}

/// Font properties after applying block-kind rules
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFont {
    pub family: Option<String>,
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let style: BlockStyle = serde_json::from_str(r#"{"bold": false}"#).unwrap();
        assert_eq!(style.bold, Some(false));
        assert_eq!(style.font_size, None);
        assert_eq!(style.padding_mm, 1.0);
        assert_eq!(style.border, BorderKind::None);
    }

    #[test]
    fn test_camel_case_keys() {
        let style = BlockStyle {
            font_size: Some(12.0),
            padding_mm: 2.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["fontSize"], 12.0);
        assert_eq!(json["paddingMm"], 2.0);
        assert!(json.get("fontFamily").is_none());
    }
}
