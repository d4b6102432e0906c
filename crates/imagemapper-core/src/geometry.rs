//! Pixel geometry primitives.
//!
//! Stored shape coordinates are integer pixels ([`Point`], [`Bounds`],
//! [`Size`]). Intermediate math (tiling steps, predicates) runs on
//! [`PointF`] and is rounded back when a coordinate is stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn to_f64(self) -> PointF {
        PointF::new(self.x as f64, self.y as f64)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.to_f64().distance_to(&other.to_f64())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Floating point position used by the predicates and the tiling math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PointF) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rounds to the nearest pixel (half away from zero).
    pub fn round(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        p.to_f64()
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Swaps width and height.
    pub fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Axis-aligned integer bounding box, `min` inclusive, `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box with its top-left corner at `(x, y)`.
    pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Smallest box covering every point; `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.min_x + self.max_x) as f64 / 2.0,
            (self.min_y + self.max_y) as f64 / 2.0,
        )
    }

    /// True when `other` lies inside this box (edges included).
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// True when the boxes share an area larger than zero.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    pub fn contains_point(&self, p: PointF) -> bool {
        p.x >= self.min_x as f64
            && p.x <= self.max_x as f64
            && p.y >= self.min_y as f64
            && p.y <= self.max_y as f64
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] - [{}, {}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let b = Bounds::from_points(&[Point::new(3, 9), Point::new(-1, 4), Point::new(7, 2)])
            .unwrap();
        assert_eq!(b, Bounds::new(-1, 2, 7, 9));
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        let a = Bounds::from_origin(0, 0, 10, 10);
        assert!(!a.overlaps(&Bounds::from_origin(10, 0, 5, 5)));
        assert!(a.overlaps(&Bounds::from_origin(9, 9, 5, 5)));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(PointF::new(1.5, -1.5).round(), Point::new(2, -2));
    }
}
