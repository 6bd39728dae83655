//! Geometry utilities - millimetre/pixel conversion, grid snapping, page sizes
//!
//! All persisted geometry is in millimetres. Pixels are a presentation
//! detail: a renderer applying a zoom factor scales every length (position,
//! size, font size, padding, margins) by the same factor.

use serde::{Deserialize, Serialize};

/// CSS pixels per millimetre (96 dpi / 25.4 mm per inch)
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Points per millimetre (72 pt per inch)
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Smallest width any committed block may have
pub const MIN_BLOCK_WIDTH_MM: f64 = 10.0;

/// Smallest height any committed block may have
pub const MIN_BLOCK_HEIGHT_MM: f64 = 8.0;

/// A4 short edge
pub const A4_WIDTH_MM: f64 = 210.0;

/// A4 long edge
pub const A4_HEIGHT_MM: f64 = 297.0;

pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

pub fn px_to_mm(px: f64) -> f64 {
    px / PX_PER_MM
}

/// Round `value` to the nearest multiple of `step`.
///
/// A non-positive or non-finite step leaves the value untouched.
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    (value / step).round() * step
}

/// Physical sheet size for an orientation. Only A4 is supported.
pub fn page_size_mm(orientation: Orientation) -> SizeMm {
    match orientation {
        Orientation::Portrait => SizeMm::new(A4_WIDTH_MM, A4_HEIGHT_MM),
        Orientation::Landscape => SizeMm::new(A4_HEIGHT_MM, A4_WIDTH_MM),
    }
}

// =============================================================================
// Page Orientation
// =============================================================================

/// Paper orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

// =============================================================================
// Value Types
// =============================================================================

/// A width/height pair in millimetres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeMm {
    pub width: f64,
    pub height: f64,
}

impl SizeMm {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in millimetres, origin at the top-left corner of the sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMm {
    pub x: f64,
    pub y: f64,
}

impl PointMm {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in millimetres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectMm {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectMm {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: PointMm) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_conversion_constant() {
        assert!((mm_to_px(1.0) - 3.7795).abs() < 1e-3);
        assert!((mm_to_px(25.4) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(12.4, 5.0), 10.0);
        assert_eq!(snap_to_grid(12.5, 5.0), 15.0);
        assert_eq!(snap_to_grid(7.0, 0.0), 7.0);
        assert_eq!(snap_to_grid(7.0, -2.0), 7.0);
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(page_size_mm(Orientation::Portrait), SizeMm::new(210.0, 297.0));
        assert_eq!(page_size_mm(Orientation::Landscape), SizeMm::new(297.0, 210.0));
    }

    #[test]
    fn test_rect_contains() {
        let r = RectMm::new(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains(PointMm::new(10.0, 20.0)));
        assert!(r.contains(PointMm::new(30.0, 15.0)));
        assert!(!r.contains(PointMm::new(31.0, 15.0)));
    }

    proptest! {
        #[test]
        fn prop_px_mm_round_trip(mm in -10_000.0f64..10_000.0) {
            let back = px_to_mm(mm_to_px(mm));
            prop_assert!((back - mm).abs() < 1e-9);
        }

        #[test]
        fn prop_conversion_is_monotonic(a in -1_000.0f64..1_000.0, b in -1_000.0f64..1_000.0) {
            if a < b {
                prop_assert!(mm_to_px(a) < mm_to_px(b));
            }
        }

        #[test]
        fn prop_snapped_value_is_multiple_of_step(v in -500.0f64..500.0, step in 0.5f64..20.0) {
            let s = snap_to_grid(v, step);
            let k = s / step;
            prop_assert!((k - k.round()).abs() < 1e-9);
            prop_assert!((s - v).abs() <= step / 2.0 + 1e-9);
        }
    }
}
