use smallvec::SmallVec;

use imagemapper_core::{Bounds, PointF};

use super::triangle::EQUILATERAL_RATIO;
use super::{BoxCoords, CircleCoords};

/// Pointy left and right, slanted edges inset by a quarter of the width.
pub(crate) const HEX_TEMPLATE: [(f64, f64); 6] = [
    (0.0, 0.5),
    (0.25, 0.0),
    (0.75, 0.0),
    (1.0, 0.5),
    (0.75, 1.0),
    (0.25, 1.0),
];

pub fn rect_hex_vertices(coords: &BoxCoords) -> SmallVec<[PointF; 6]> {
    coords.place_template(&HEX_TEMPLATE)
}

/// Half the height of the regular hexagon inscribed in a circle of radius `r`.
pub fn regular_half_height(r: i32) -> i32 {
    (r as f64 * EQUILATERAL_RATIO).round() as i32
}

pub fn regular_hex_bounds(coords: &CircleCoords) -> Bounds {
    let half_h = regular_half_height(coords.r);
    Bounds::new(
        coords.x - coords.r,
        coords.y - half_h,
        coords.x + coords.r,
        coords.y + half_h,
    )
}

/// Vertices at 0, 60, ..., 300 degrees around the center.
pub fn regular_hex_vertices(coords: &CircleCoords) -> SmallVec<[PointF; 6]> {
    let r = coords.r as f64;
    (0..6)
        .map(|i| {
            let angle = (i as f64 * 60.0).to_radians();
            PointF::new(
                coords.x as f64 + r * angle.cos(),
                coords.y as f64 + r * angle.sin(),
            )
        })
        .collect()
}

/// Largest radius whose rounded half height stays within `limit`.
pub(crate) fn max_radius_for_half_height(limit: i32) -> i32 {
    (limit as f64 / EQUILATERAL_RATIO).floor() as i32
}
