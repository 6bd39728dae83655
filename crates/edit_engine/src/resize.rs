//! Resize and move geometry
//!
//! Pure functions over millimetre rectangles. A resize handle moves exactly
//! one edge and keeps the opposite edge stationary:
//!
//! | Handle | Size                      | Origin                |
//! |--------|---------------------------|-----------------------|
//! | east   | `w' = max(10, w + dx)`    | x unchanged           |
//! | west   | `w' = max(10, w - dx)`    | `x' = x + w - w'`     |
//! | south  | `h' = max(8, h + dy)`     | y unchanged           |
//! | north  | `h' = max(8, h - dy)`     | `y' = y + h - h'`     |
//!
//! While the floor is not hit, `x' = x + dx` (resp. `y' = y + dy`).

use doc_model::{snap_to_grid, RectMm, MIN_BLOCK_HEIGHT_MM, MIN_BLOCK_WIDTH_MM};
use serde::{Deserialize, Serialize};

/// Edge controlled by a resize drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleDirection {
    North,
    South,
    East,
    West,
}

impl HandleDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, HandleDirection::East | HandleDirection::West)
    }
}

/// Transient geometry for a resize in progress
pub fn resize_rect(handle: HandleDirection, start: RectMm, dx_mm: f64, dy_mm: f64) -> RectMm {
    let mut rect = start;
    match handle {
        HandleDirection::East => {
            rect.width = (start.width + dx_mm).max(MIN_BLOCK_WIDTH_MM);
        }
        HandleDirection::West => {
            rect.width = (start.width - dx_mm).max(MIN_BLOCK_WIDTH_MM);
            rect.x = start.right() - rect.width;
        }
        HandleDirection::South => {
            rect.height = (start.height + dy_mm).max(MIN_BLOCK_HEIGHT_MM);
        }
        HandleDirection::North => {
            rect.height = (start.height - dy_mm).max(MIN_BLOCK_HEIGHT_MM);
            rect.y = start.bottom() - rect.height;
        }
    }
    rect
}

/// Geometry committed when a resize is released.
///
/// The size along the handle's axis is snapped to the grid when a step is
/// given, then limited so the moving edge stays inside `usable`. The edge
/// opposite the handle never moves. The minimum size wins over the usable
/// area when the two conflict.
pub fn finalize_resize(handle: HandleDirection, rect: RectMm, usable: RectMm, snap_step: Option<f64>) -> RectMm {
    let mut out = rect;
    let snap = |v: f64| snap_step.map_or(v, |step| snap_to_grid(v, step));

    match handle {
        HandleDirection::East => {
            let max_width = usable.right() - rect.x;
            out.width = snap(rect.width).min(max_width).max(MIN_BLOCK_WIDTH_MM);
        }
        HandleDirection::West => {
            let anchor = rect.right();
            let max_width = anchor - usable.x;
            out.width = snap(rect.width).min(max_width).max(MIN_BLOCK_WIDTH_MM);
            out.x = anchor - out.width;
        }
        HandleDirection::South => {
            let max_height = usable.bottom() - rect.y;
            out.height = snap(rect.height).min(max_height).max(MIN_BLOCK_HEIGHT_MM);
        }
        HandleDirection::North => {
            let anchor = rect.bottom();
            let max_height = anchor - usable.y;
            out.height = snap(rect.height).min(max_height).max(MIN_BLOCK_HEIGHT_MM);
            out.y = anchor - out.height;
        }
    }
    out
}

/// Transient geometry for a move in progress
pub fn move_rect(start: RectMm, dx_mm: f64, dy_mm: f64) -> RectMm {
    RectMm::new(start.x + dx_mm, start.y + dy_mm, start.width, start.height)
}

/// Geometry committed when a move is released.
///
/// The origin is snapped to the grid when a step is given, then clamped so
/// the block stays inside `usable`. A block wider (or taller) than the
/// usable area is pinned to its left (or top) edge.
pub fn finalize_move(rect: RectMm, usable: RectMm, snap_step: Option<f64>) -> RectMm {
    let snap = |v: f64| snap_step.map_or(v, |step| snap_to_grid(v, step));
    let clamp_axis = |v: f64, low: f64, extent: f64, span: f64| {
        let high = low + span - extent;
        if high < low {
            low
        } else {
            v.clamp(low, high)
        }
    };

    RectMm::new(
        clamp_axis(snap(rect.x), usable.x, rect.width, usable.width),
        clamp_axis(snap(rect.y), usable.y, rect.height, usable.height),
        rect.width,
        rect.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: RectMm = RectMm::new(50.0, 60.0, 40.0, 20.0);
    const USABLE: RectMm = RectMm::new(15.0, 15.0, 180.0, 267.0);

    #[test]
    fn test_east_grows_width_only() {
        let r = resize_rect(HandleDirection::East, START, 12.5, 99.0);
        assert_eq!(r, RectMm::new(50.0, 60.0, 52.5, 20.0));
    }

    #[test]
    fn test_west_moves_origin_with_pointer() {
        let r = resize_rect(HandleDirection::West, START, -10.0, 0.0);
        assert_eq!(r.x, 40.0);
        assert_eq!(r.width, 50.0);
        assert_eq!(r.right(), START.right());
    }

    #[test]
    fn test_west_floor_keeps_right_edge() {
        let r = resize_rect(HandleDirection::West, START, 35.0, 0.0);
        assert_eq!(r.width, MIN_BLOCK_WIDTH_MM);
        assert_eq!(r.right(), START.right());
    }

    #[test]
    fn test_north_and_south() {
        let n = resize_rect(HandleDirection::North, START, 0.0, -5.0);
        assert_eq!((n.y, n.height), (55.0, 25.0));
        let s = resize_rect(HandleDirection::South, START, 0.0, -50.0);
        assert_eq!((s.y, s.height), (60.0, MIN_BLOCK_HEIGHT_MM));
    }

    #[test]
    fn test_finalize_snaps_then_clamps() {
        let r = finalize_resize(HandleDirection::East, RectMm::new(50.0, 60.0, 42.4, 20.0), USABLE, Some(5.0));
        assert_eq!(r.width, 40.0);

        let r = finalize_resize(HandleDirection::East, RectMm::new(150.0, 60.0, 70.0, 20.0), USABLE, Some(5.0));
        assert_eq!(r.right(), USABLE.right());
    }

    #[test]
    fn test_finalize_west_clamps_to_left_margin() {
        let r = finalize_resize(HandleDirection::West, RectMm::new(5.0, 60.0, 85.0, 20.0), USABLE, None);
        assert_eq!(r.x, USABLE.x);
        assert_eq!(r.right(), 90.0);
    }

    #[test]
    fn test_finalize_north_keeps_bottom_edge() {
        let rect = resize_rect(HandleDirection::North, START, 0.0, -7.0);
        let r = finalize_resize(HandleDirection::North, rect, USABLE, Some(5.0));
        assert_eq!(r.height, 25.0);
        assert_eq!(r.bottom(), START.bottom());
    }

    #[test]
    fn test_finalize_move_clamps_inside_usable_area() {
        let r = finalize_move(RectMm::new(190.0, -4.0, 40.0, 20.0), USABLE, None);
        assert_eq!((r.x, r.y), (155.0, 15.0));

        let r = finalize_move(RectMm::new(31.0, 42.0, 40.0, 20.0), USABLE, Some(5.0));
        assert_eq!((r.x, r.y), (30.0, 40.0));

        let wide = finalize_move(RectMm::new(40.0, 40.0, 400.0, 20.0), USABLE, None);
        assert_eq!(wide.x, USABLE.x);
    }

    fn handle() -> impl Strategy<Value = HandleDirection> {
        prop_oneof![
            Just(HandleDirection::North),
            Just(HandleDirection::South),
            Just(HandleDirection::East),
            Just(HandleDirection::West),
        ]
    }

    fn start_rect() -> impl Strategy<Value = RectMm> {
        (0.0f64..150.0, 0.0f64..200.0, 10.0f64..100.0, 8.0f64..80.0)
            .prop_map(|(x, y, w, h)| RectMm::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_resize_never_breaks_floor(h in handle(), r in start_rect(), dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
            let out = resize_rect(h, r, dx, dy);
            prop_assert!(out.width >= MIN_BLOCK_WIDTH_MM);
            prop_assert!(out.height >= MIN_BLOCK_HEIGHT_MM);
            let done = finalize_resize(h, out, USABLE, Some(5.0));
            prop_assert!(done.width >= MIN_BLOCK_WIDTH_MM);
            prop_assert!(done.height >= MIN_BLOCK_HEIGHT_MM);
        }

        #[test]
        fn prop_opposite_edge_is_stationary(h in handle(), r in start_rect(), dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
            let out = finalize_resize(h, resize_rect(h, r, dx, dy), USABLE, Some(5.0));
            match h {
                HandleDirection::East => prop_assert_eq!(out.x, r.x),
                HandleDirection::West => prop_assert!((out.right() - r.right()).abs() < 1e-9),
                HandleDirection::South => prop_assert_eq!(out.y, r.y),
                HandleDirection::North => prop_assert!((out.bottom() - r.bottom()).abs() < 1e-9),
            }
        }

        #[test]
        fn prop_east_width_tracks_delta(r in start_rect(), dx in 0.0f64..100.0) {
            let out = resize_rect(HandleDirection::East, r, dx, 0.0);
            prop_assert_eq!(out.x, r.x);
            prop_assert!((out.width - (r.width + dx)).abs() < 1e-9);
        }

        #[test]
        fn prop_resize_touches_one_axis(h in handle(), r in start_rect(), dx in -50.0f64..50.0, dy in -50.0f64..50.0) {
            let out = resize_rect(h, r, dx, dy);
            if h.is_horizontal() {
                prop_assert_eq!((out.y, out.height), (r.y, r.height));
            } else {
                prop_assert_eq!((out.x, out.width), (r.x, r.width));
            }
        }
    }
}
