use imagemapper_core::{PointF, Size};

use super::Handle;
use crate::model::{max_radius_for_half_height, BoxCoords, CircleCoords};

/// Upright hex handles: the two points and the four slanted vertices.
pub(crate) const HEX_HANDLES: [Handle; 6] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::Right,
    Handle::BottomRight,
    Handle::BottomLeft,
    Handle::Left,
];

/// Handle positions sit on the hex vertices, so the corner handles are
/// inset by a quarter of the width.
pub(crate) fn position(coords: &BoxCoords, handle: Handle) -> Option<PointF> {
    let (u, v) = match handle {
        Handle::TopLeft => (0.25, 0.0),
        Handle::TopRight => (0.75, 0.0),
        Handle::BottomRight => (0.75, 1.0),
        Handle::BottomLeft => (0.25, 1.0),
        Handle::Left | Handle::Right => handle.unit_position()?,
        _ => return None,
    };
    Some(coords.at_unit(u, v))
}

/// Largest radius of a regular hex centered at `coords` that stays on the
/// canvas, counting its rounded half height.
pub(crate) fn max_regular_radius(coords: &CircleCoords, canvas: Size) -> i32 {
    let horizontal = coords.x.min(canvas.width - coords.x);
    let vertical = coords.y.min(canvas.height - coords.y);
    horizontal.min(max_radius_for_half_height(vertical))
}
