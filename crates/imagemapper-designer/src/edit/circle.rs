//! Radius handles. The center never moves; the radius follows the axis of
//! the dragged handle.

use imagemapper_core::{Point, Size};

use super::{DeltaBounds, Handle};
use crate::model::{max_radius, CircleCoords};

/// Sign of the radius change per unit of cursor delta, per axis.
fn radial_direction(handle: Handle) -> Option<(i32, i32)> {
    match handle {
        Handle::Right => Some((1, 0)),
        Handle::Left => Some((-1, 0)),
        Handle::Bottom => Some((0, 1)),
        Handle::Top => Some((0, -1)),
        _ => None,
    }
}

pub(crate) fn max_circle_radius(coords: &CircleCoords, canvas: Size) -> i32 {
    max_radius(coords.x, coords.y, canvas.width, canvas.height)
}

pub(crate) fn position(coords: &CircleCoords, handle: Handle) -> Option<Point> {
    let (sx, sy) = radial_direction(handle)?;
    Some(Point::new(coords.x + sx * coords.r, coords.y + sy * coords.r))
}

pub(crate) fn bounds(coords: &CircleCoords, handle: Handle, r_max: i32) -> Option<DeltaBounds> {
    let (sx, sy) = radial_direction(handle)?;
    let range = |sign: i32| match sign {
        1 => (-coords.r, r_max - coords.r),
        -1 => (coords.r - r_max, coords.r),
        _ => (0, 0),
    };
    let (dx_min, dx_max) = range(sx);
    let (dy_min, dy_max) = range(sy);
    Some(DeltaBounds::new(dx_min, dx_max, dy_min, dy_max))
}

pub(crate) fn apply(coords: &CircleCoords, handle: Handle, dx: i32, dy: i32) -> Option<CircleCoords> {
    let (sx, sy) = radial_direction(handle)?;
    Some(CircleCoords::new(coords.x, coords.y, coords.r + sx * dx + sy * dy))
}
