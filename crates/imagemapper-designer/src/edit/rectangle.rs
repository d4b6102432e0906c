//! Side and diagonal algebra on a bounding box.
//!
//! Side algebra moves the edges named by the handle: `Left` moves the left
//! edge, `TopRight` the top and right edges. Diagonal algebra projects the
//! delta onto the handle's diagonal and grows both sides by the same amount.

use imagemapper_core::Size;

use super::{DeltaBounds, Handle};
use crate::model::BoxCoords;

/// `n / 2` rounded half away from zero, so `half_round(-n) == -half_round(n)`.
pub fn half_round(n: i32) -> i32 {
    if n >= 0 {
        (n + 1) / 2
    } else {
        -((-n + 1) / 2)
    }
}

/// -1 for the left edge, 1 for the right edge, 0 when the handle moves
/// neither.
fn horizontal_side(handle: Handle) -> i32 {
    match handle {
        Handle::Left | Handle::TopLeft | Handle::BottomLeft => -1,
        Handle::Right | Handle::TopRight | Handle::BottomRight => 1,
        _ => 0,
    }
}

fn vertical_side(handle: Handle) -> i32 {
    match handle {
        Handle::Top | Handle::TopLeft | Handle::TopRight => -1,
        Handle::Bottom | Handle::BottomLeft | Handle::BottomRight => 1,
        _ => 0,
    }
}

fn side_range(side: i32, start: i32, extent: i32, limit: i32) -> (i32, i32) {
    match side {
        -1 => (-start, extent),
        1 => (-extent, limit - start - extent),
        _ => (0, 0),
    }
}

pub(crate) fn side_bounds(coords: &BoxCoords, handle: Handle, canvas: Size) -> DeltaBounds {
    let (dx_min, dx_max) = side_range(horizontal_side(handle), coords.x, coords.width, canvas.width);
    let (dy_min, dy_max) = side_range(vertical_side(handle), coords.y, coords.height, canvas.height);
    DeltaBounds::new(dx_min, dx_max, dy_min, dy_max)
}

pub(crate) fn apply_sides(coords: &BoxCoords, handle: Handle, dx: i32, dy: i32) -> BoxCoords {
    let mut out = *coords;
    match horizontal_side(handle) {
        -1 => {
            out.x += dx;
            out.width -= dx;
        }
        1 => out.width += dx,
        _ => {}
    }
    match vertical_side(handle) {
        -1 => {
            out.y += dy;
            out.height -= dy;
        }
        1 => out.height += dy,
        _ => {}
    }
    out
}

/// Growth along the diagonal of a corner handle.
pub(crate) fn diagonal_growth(handle: Handle, dx: i32, dy: i32) -> i32 {
    half_round(horizontal_side(handle) * dx + vertical_side(handle) * dy)
}

/// Range of the diagonal growth `s` for a corner handle: the box may shrink
/// to nothing and grow until either moving edge reaches the canvas.
pub(crate) fn growth_range(coords: &BoxCoords, handle: Handle, canvas: Size) -> Option<(i32, i32)> {
    let (sx, sy) = (horizontal_side(handle), vertical_side(handle));
    if sx == 0 || sy == 0 {
        return None;
    }
    let room_x = if sx > 0 {
        canvas.width - coords.x - coords.width
    } else {
        coords.x
    };
    let room_y = if sy > 0 {
        canvas.height - coords.y - coords.height
    } else {
        coords.y
    };
    Some((-coords.width.min(coords.height), room_x.min(room_y)))
}

/// Cursor bounds for a growth range: each axis alone may reach either end.
pub(crate) fn growth_bounds(handle: Handle, (s_min, s_max): (i32, i32)) -> DeltaBounds {
    let axis = |side: i32| {
        if side > 0 {
            (s_min, s_max)
        } else {
            (-s_max, -s_min)
        }
    };
    let (dx_min, dx_max) = axis(horizontal_side(handle));
    let (dy_min, dy_max) = axis(vertical_side(handle));
    DeltaBounds::new(dx_min, dx_max, dy_min, dy_max)
}

/// Grows the box by `s` on both sides, away from the corner opposite the
/// handle.
pub(crate) fn grow_from_corner(coords: &BoxCoords, handle: Handle, s: i32) -> BoxCoords {
    let mut out = *coords;
    if horizontal_side(handle) < 0 {
        out.x -= s;
    }
    if vertical_side(handle) < 0 {
        out.y -= s;
    }
    out.width += s;
    out.height += s;
    out
}

pub(crate) fn diagonal_bounds(coords: &BoxCoords, handle: Handle, canvas: Size) -> DeltaBounds {
    growth_range(coords, handle, canvas)
        .map(|range| growth_bounds(handle, range))
        .unwrap_or_else(DeltaBounds::fixed)
}

pub(crate) fn apply_diagonal(coords: &BoxCoords, handle: Handle, dx: i32, dy: i32) -> BoxCoords {
    grow_from_corner(coords, handle, diagonal_growth(handle, dx, dy))
}
