//! Triangle templates and ratio constraints.
//!
//! Every triangle is stored as a [`BoxCoords`]. The vertices are derived
//! from a tilt-0 template in unit box coordinates, turned by the box tilt.

use smallvec::SmallVec;

use imagemapper_core::PointF;

use super::BoxCoords;

/// `sqrt(3) / 2`, the height of an equilateral triangle with unit base.
pub const EQUILATERAL_RATIO: f64 = 0.866_025_403_784_438_6;

/// Allowed deviation from the exact ratio, in pixels.
pub const RATIO_TOLERANCE: f64 = 1.0;

/// Apex at the top center, base along the bottom edge.
pub(crate) const APEX_TEMPLATE: [(f64, f64); 3] = [(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Right angle at the bottom-left corner.
pub(crate) const RIGHT_TEMPLATE: [(f64, f64); 3] = [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

pub fn apex_triangle_vertices(coords: &BoxCoords) -> SmallVec<[PointF; 6]> {
    coords.place_template(&APEX_TEMPLATE)
}

pub fn right_triangle_vertices(coords: &BoxCoords) -> SmallVec<[PointF; 6]> {
    coords.place_template(&RIGHT_TEMPLATE)
}

/// Extent along the apex direction and along the base.
pub fn apex_and_base(coords: &BoxCoords) -> (i32, i32) {
    if coords.tilt.is_vertical() {
        (coords.height, coords.width)
    } else {
        (coords.width, coords.height)
    }
}

/// Apex extent matching a base of `base` pixels.
pub fn equilateral_apex_for_base(base: i32) -> i32 {
    (base as f64 * EQUILATERAL_RATIO).round() as i32
}

/// Base matching an apex extent of `apex` pixels.
pub fn equilateral_base_for_apex(apex: i32) -> i32 {
    (apex as f64 / EQUILATERAL_RATIO).round() as i32
}

pub fn is_equilateral(coords: &BoxCoords) -> bool {
    let (apex, base) = apex_and_base(coords);
    coords.has_area() && (apex as f64 - EQUILATERAL_RATIO * base as f64).abs() <= RATIO_TOLERANCE
}

/// Right triangles are isosceles: both legs within a pixel of each other.
pub fn is_right_isosceles(coords: &BoxCoords) -> bool {
    coords.has_area() && (coords.width - coords.height).abs() as f64 <= RATIO_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tilt;

    #[test]
    fn test_equilateral_ratio_respects_tilt() {
        let upright = BoxCoords::new(0, 0, 100, 87);
        assert!(is_equilateral(&upright));
        assert!(!is_equilateral(&upright.with_tilt(Tilt::Deg90)));
        assert!(is_equilateral(&BoxCoords::new(0, 0, 87, 100).with_tilt(Tilt::Deg270)));
    }

    #[test]
    fn test_apex_follows_tilt() {
        let coords = BoxCoords::new(0, 0, 10, 20).with_tilt(Tilt::Deg90);
        let v = apex_triangle_vertices(&coords);
        assert_eq!(v[0], PointF::new(10.0, 10.0));
    }

    #[test]
    fn test_right_angle_corner_follows_tilt() {
        let coords = BoxCoords::new(0, 0, 10, 10).with_tilt(Tilt::Deg180);
        let v = right_triangle_vertices(&coords);
        assert_eq!(v[2], PointF::new(10.0, 0.0));
    }
}
