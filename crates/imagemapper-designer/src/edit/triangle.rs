//! Triangle handles in the upright frame.
//!
//! Isosceles and equilateral triangles have their apex on `Top` and their
//! base along the bottom edge. The right triangle has its right angle at
//! `BottomLeft`, its leg ends at `TopLeft` and `BottomRight`.
//!
//! Equilateral edits re-derive one axis from the other, so dragging by `d`
//! then `-d` may differ from the start by the rounding of the derived axis.

use imagemapper_core::Size;

use super::rectangle::{self, grow_from_corner, growth_bounds, growth_range};
use super::{DeltaBounds, Handle};
use crate::model::{equilateral_apex_for_base, equilateral_base_for_apex, BoxCoords, EQUILATERAL_RATIO};

pub(crate) const ISOSCELES_HANDLES: [Handle; 4] = [
    Handle::Top,
    Handle::BottomRight,
    Handle::Bottom,
    Handle::BottomLeft,
];

pub(crate) const EQUILATERAL_HANDLES: [Handle; 3] =
    [Handle::Top, Handle::BottomRight, Handle::BottomLeft];

pub(crate) const RIGHT_HANDLES: [Handle; 3] =
    [Handle::TopLeft, Handle::BottomRight, Handle::BottomLeft];

pub(crate) fn isosceles_bounds(coords: &BoxCoords, handle: Handle, canvas: Size) -> Option<DeltaBounds> {
    match handle {
        Handle::Top => Some(DeltaBounds::new(
            -coords.width.div_euclid(2),
            (canvas.width - coords.x - coords.width).div_euclid(2),
            -coords.y,
            coords.height,
        )),
        Handle::BottomLeft | Handle::BottomRight | Handle::Bottom => {
            Some(rectangle::side_bounds(coords, handle, canvas))
        }
        _ => None,
    }
}

/// The apex drag keeps the base start anchored: a horizontal delta moves the
/// apex by `dx` and the far base corner by `2 dx`.
pub(crate) fn isosceles_apply(coords: &BoxCoords, handle: Handle, dx: i32, dy: i32) -> Option<BoxCoords> {
    match handle {
        Handle::Top => Some(BoxCoords {
            y: coords.y + dy,
            height: coords.height - dy,
            width: coords.width + 2 * dx,
            ..*coords
        }),
        Handle::BottomLeft | Handle::BottomRight | Handle::Bottom => {
            Some(rectangle::apply_sides(coords, handle, dx, dy))
        }
        _ => None,
    }
}

/// Largest base that fits `room` pixels of apex height.
fn base_limit_for_height(room: i32) -> i32 {
    (room as f64 / EQUILATERAL_RATIO).floor() as i32
}

/// Largest apex height whose derived base fits `room` pixels.
fn height_limit_for_base(room: i32) -> i32 {
    (room as f64 * EQUILATERAL_RATIO).floor() as i32
}

pub(crate) fn equilateral_bounds(coords: &BoxCoords, handle: Handle, canvas: Size) -> Option<DeltaBounds> {
    let bottom = coords.y + coords.height;
    match handle {
        Handle::Top => {
            let h_max = bottom.min(height_limit_for_base(canvas.width - coords.x));
            Some(DeltaBounds::new(0, 0, coords.height - h_max, coords.height))
        }
        Handle::BottomRight => {
            let w_max = (canvas.width - coords.x).min(base_limit_for_height(bottom));
            Some(DeltaBounds::new(-coords.width, w_max - coords.width, 0, 0))
        }
        Handle::BottomLeft => {
            let right = coords.x + coords.width;
            let w_max = right.min(base_limit_for_height(bottom));
            Some(DeltaBounds::new(coords.width - w_max, coords.width, 0, 0))
        }
        _ => None,
    }
}

pub(crate) fn equilateral_apply(coords: &BoxCoords, handle: Handle, dx: i32, dy: i32) -> Option<BoxCoords> {
    let bottom = coords.y + coords.height;
    let with_base = |x: i32, width: i32| {
        let height = equilateral_apex_for_base(width);
        BoxCoords {
            x,
            y: bottom - height,
            width,
            height,
            ..*coords
        }
    };
    match handle {
        Handle::Top => {
            let height = coords.height - dy;
            Some(BoxCoords {
                y: coords.y + dy,
                height,
                width: equilateral_base_for_apex(height),
                ..*coords
            })
        }
        Handle::BottomRight => Some(with_base(coords.x, coords.width + dx)),
        Handle::BottomLeft => Some(with_base(coords.x + dx, coords.width - dx)),
        _ => None,
    }
}

pub(crate) fn right_bounds(coords: &BoxCoords, handle: Handle, canvas: Size) -> Option<DeltaBounds> {
    let shrink = coords.width.min(coords.height);
    match handle {
        // Raises or lowers the top leg end; the other leg follows.
        Handle::TopLeft => {
            let grow = coords.y.min(canvas.width - coords.x - coords.width);
            Some(DeltaBounds::new(0, 0, -grow, shrink))
        }
        Handle::BottomRight => {
            let grow = coords.y.min(canvas.width - coords.x - coords.width);
            Some(DeltaBounds::new(-shrink, grow, 0, 0))
        }
        Handle::BottomLeft => growth_range(coords, handle, canvas).map(|range| growth_bounds(handle, range)),
        _ => None,
    }
}

pub(crate) fn right_apply(coords: &BoxCoords, handle: Handle, dx: i32, dy: i32) -> Option<BoxCoords> {
    match handle {
        Handle::TopLeft => Some(BoxCoords {
            y: coords.y + dy,
            width: coords.width - dy,
            height: coords.height - dy,
            ..*coords
        }),
        Handle::BottomRight => Some(BoxCoords {
            y: coords.y - dx,
            width: coords.width + dx,
            height: coords.height + dx,
            ..*coords
        }),
        Handle::BottomLeft => Some(grow_from_corner(
            coords,
            handle,
            rectangle::diagonal_growth(handle, dx, dy),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::is_equilateral;

    const CANVAS: Size = Size::new(300, 300);

    #[test]
    fn test_apex_drag_keeps_base_start() {
        let coords = BoxCoords::new(10, 50, 40, 30);
        let moved = isosceles_apply(&coords, Handle::Top, 3, -5).unwrap();
        assert_eq!(moved, BoxCoords::new(10, 45, 46, 35));
    }

    #[test]
    fn test_equilateral_edits_stay_equilateral() {
        let coords = BoxCoords::new(20, 20, 100, 87);
        for (handle, dx, dy) in [
            (Handle::Top, 0, -10),
            (Handle::BottomRight, 17, 0),
            (Handle::BottomLeft, -9, 0),
        ] {
            let bounds = equilateral_bounds(&coords, handle, CANVAS).unwrap();
            assert!(bounds.contains(dx, dy), "{handle} {bounds}");
            let edited = equilateral_apply(&coords, handle, dx, dy).unwrap();
            assert!(is_equilateral(&edited), "{handle} produced {edited:?}");
        }
    }

    #[test]
    fn test_equilateral_base_edit_keeps_base_line() {
        let coords = BoxCoords::new(20, 20, 100, 87);
        let edited = equilateral_apply(&coords, Handle::BottomRight, 20, 0).unwrap();
        assert_eq!(edited.y + edited.height, 107);
        assert_eq!(edited.x, 20);
    }

    #[test]
    fn test_right_triangle_leg_end_moves_both_legs() {
        let coords = BoxCoords::new(10, 10, 20, 20);
        let edited = right_apply(&coords, Handle::BottomRight, 5, 0).unwrap();
        assert_eq!(edited, BoxCoords::new(10, 5, 25, 25));
        let edited = right_apply(&coords, Handle::TopLeft, 0, 4).unwrap();
        assert_eq!(edited, BoxCoords::new(10, 14, 16, 16));
    }

    #[test]
    fn test_right_angle_corner_uses_diagonal() {
        let coords = BoxCoords::new(10, 10, 20, 20);
        let edited = right_apply(&coords, Handle::BottomLeft, -3, 3).unwrap();
        assert_eq!(edited, BoxCoords::new(7, 10, 23, 23));
    }
}
