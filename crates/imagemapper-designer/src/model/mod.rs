//! Shape model.
//!
//! [`Shape`] is a sum type over every drawable kind. Each variant carries
//! the coordinate record of its family; geometry (bounds, vertices,
//! outline, validity) is derived by pure functions that never mutate the
//! shape.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use imagemapper_core::{Bounds, Point, PointF};

mod circle;
mod hexagon;
mod polygon;
mod rectangle;
mod triangle;

pub use circle::CircleCoords;
pub use hexagon::{regular_half_height, regular_hex_bounds, regular_hex_vertices, rect_hex_vertices};
pub use polygon::{is_valid_polygon, signed_area2};
pub use rectangle::{rectangle_corners, BoxCoords};
pub use triangle::{
    apex_and_base, equilateral_apex_for_base, equilateral_base_for_apex, is_equilateral,
    is_right_isosceles, EQUILATERAL_RATIO,
};

pub(crate) use circle::max_radius;
pub(crate) use hexagon::max_radius_for_half_height;

/// Number of segments used when an ellipse has to be treated as a polygon.
pub const ELLIPSE_SEGMENTS: usize = 32;

/// One of four discrete orientations, clockwise from upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Tilt {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Tilt {
    pub const ALL: [Tilt; 4] = [Tilt::Deg0, Tilt::Deg90, Tilt::Deg180, Tilt::Deg270];

    pub fn quarter_turns(self) -> u8 {
        match self {
            Tilt::Deg0 => 0,
            Tilt::Deg90 => 1,
            Tilt::Deg180 => 2,
            Tilt::Deg270 => 3,
        }
    }

    pub fn from_quarter_turns(turns: i32) -> Self {
        Self::ALL[turns.rem_euclid(4) as usize]
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Accepts any multiple of 90, negative values included.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::from_quarter_turns(degrees / 90))
    }

    /// Adds `turns` clockwise quarter turns.
    pub fn turned(self, turns: i32) -> Self {
        Self::from_quarter_turns(self.quarter_turns() as i32 + turns)
    }

    pub fn opposite(self) -> Self {
        self.turned(2)
    }

    /// True for 0 and 180: the shape's base lies along a horizontal edge.
    pub fn is_vertical(self) -> bool {
        matches!(self, Tilt::Deg0 | Tilt::Deg180)
    }
}

impl From<Tilt> for u16 {
    fn from(tilt: Tilt) -> Self {
        tilt.degrees()
    }
}

impl TryFrom<u16> for Tilt {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 | 90 | 180 | 270 => Ok(Self::from_quarter_turns(value as i32 / 90)),
            other => Err(format!("tilt must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

impl fmt::Display for Tilt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Discriminant of [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Rhombus,
    Ellipse,
    CircleFromCenter,
    CircleFromDiameter,
    IsoscelesTriangle,
    EquilateralTriangle,
    RightTriangle,
    HexFromRectangle,
    HexFromDiameter,
    Polygon,
}

/// HTML `<area shape=...>` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaType {
    Rect,
    Circle,
    Poly,
}

impl AreaType {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaType::Rect => "rect",
            AreaType::Circle => "circle",
            AreaType::Poly => "poly",
        }
    }
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Rectangle,
        ShapeKind::Square,
        ShapeKind::Rhombus,
        ShapeKind::Ellipse,
        ShapeKind::CircleFromCenter,
        ShapeKind::CircleFromDiameter,
        ShapeKind::IsoscelesTriangle,
        ShapeKind::EquilateralTriangle,
        ShapeKind::RightTriangle,
        ShapeKind::HexFromRectangle,
        ShapeKind::HexFromDiameter,
        ShapeKind::Polygon,
    ];

    /// Stable name used in design files.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Rhombus => "rhombus",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::CircleFromCenter => "circle",
            ShapeKind::CircleFromDiameter => "circle-diameter",
            ShapeKind::IsoscelesTriangle => "isosceles-triangle",
            ShapeKind::EquilateralTriangle => "equilateral-triangle",
            ShapeKind::RightTriangle => "right-triangle",
            ShapeKind::HexFromRectangle => "hex",
            ShapeKind::HexFromDiameter => "hex-diameter",
            ShapeKind::Polygon => "polygon",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn area_type(self) -> AreaType {
        match self {
            ShapeKind::Rectangle | ShapeKind::Square => AreaType::Rect,
            ShapeKind::CircleFromCenter | ShapeKind::CircleFromDiameter => AreaType::Circle,
            _ => AreaType::Poly,
        }
    }

    /// Kinds stored as a bounding box with a tilt.
    pub fn is_box(self) -> bool {
        !matches!(
            self,
            ShapeKind::CircleFromCenter
                | ShapeKind::CircleFromDiameter
                | ShapeKind::HexFromDiameter
                | ShapeKind::Polygon
        )
    }

    /// Kinds whose tilt changes their geometry.
    pub fn uses_tilt(self) -> bool {
        matches!(
            self,
            ShapeKind::IsoscelesTriangle
                | ShapeKind::EquilateralTriangle
                | ShapeKind::RightTriangle
                | ShapeKind::HexFromRectangle
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry handed to the containment predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Polygon(Vec<PointF>),
    Circle { center: PointF, radius: f64 },
    Ellipse { center: PointF, rx: f64, ry: f64 },
}

impl Outline {
    /// Point list of the outline; circles and ellipses are sampled.
    pub fn sample(&self, segments: usize) -> Vec<PointF> {
        match self {
            Outline::Polygon(points) => points.clone(),
            Outline::Circle { center, radius } => sample_ellipse(*center, *radius, *radius, segments),
            Outline::Ellipse { center, rx, ry } => sample_ellipse(*center, *rx, *ry, segments),
        }
    }
}

pub fn sample_ellipse(center: PointF, rx: f64, ry: f64, segments: usize) -> Vec<PointF> {
    (0..segments)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            PointF::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// A shape on the image, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "coords", rename_all = "kebab-case")]
pub enum Shape {
    Rectangle(BoxCoords),
    Square(BoxCoords),
    Rhombus(BoxCoords),
    Ellipse(BoxCoords),
    CircleFromCenter(CircleCoords),
    CircleFromDiameter(CircleCoords),
    IsoscelesTriangle(BoxCoords),
    EquilateralTriangle(BoxCoords),
    RightTriangle(BoxCoords),
    HexFromRectangle(BoxCoords),
    HexFromDiameter(CircleCoords),
    Polygon(Vec<Point>),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Square(_) => ShapeKind::Square,
            Shape::Rhombus(_) => ShapeKind::Rhombus,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::CircleFromCenter(_) => ShapeKind::CircleFromCenter,
            Shape::CircleFromDiameter(_) => ShapeKind::CircleFromDiameter,
            Shape::IsoscelesTriangle(_) => ShapeKind::IsoscelesTriangle,
            Shape::EquilateralTriangle(_) => ShapeKind::EquilateralTriangle,
            Shape::RightTriangle(_) => ShapeKind::RightTriangle,
            Shape::HexFromRectangle(_) => ShapeKind::HexFromRectangle,
            Shape::HexFromDiameter(_) => ShapeKind::HexFromDiameter,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Builds a box-family shape; `None` for circle kinds and polygons.
    pub fn from_box(kind: ShapeKind, coords: BoxCoords) -> Option<Self> {
        Some(match kind {
            ShapeKind::Rectangle => Shape::Rectangle(coords),
            ShapeKind::Square => Shape::Square(coords),
            ShapeKind::Rhombus => Shape::Rhombus(coords),
            ShapeKind::Ellipse => Shape::Ellipse(coords),
            ShapeKind::IsoscelesTriangle => Shape::IsoscelesTriangle(coords),
            ShapeKind::EquilateralTriangle => Shape::EquilateralTriangle(coords),
            ShapeKind::RightTriangle => Shape::RightTriangle(coords),
            ShapeKind::HexFromRectangle => Shape::HexFromRectangle(coords),
            _ => return None,
        })
    }

    /// Builds a circle-family shape; `None` for every other kind.
    pub fn from_circle(kind: ShapeKind, coords: CircleCoords) -> Option<Self> {
        Some(match kind {
            ShapeKind::CircleFromCenter => Shape::CircleFromCenter(coords),
            ShapeKind::CircleFromDiameter => Shape::CircleFromDiameter(coords),
            ShapeKind::HexFromDiameter => Shape::HexFromDiameter(coords),
            _ => return None,
        })
    }

    pub fn box_coords(&self) -> Option<&BoxCoords> {
        match self {
            Shape::Rectangle(c)
            | Shape::Square(c)
            | Shape::Rhombus(c)
            | Shape::Ellipse(c)
            | Shape::IsoscelesTriangle(c)
            | Shape::EquilateralTriangle(c)
            | Shape::RightTriangle(c)
            | Shape::HexFromRectangle(c) => Some(c),
            _ => None,
        }
    }

    pub fn circle_coords(&self) -> Option<&CircleCoords> {
        match self {
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) | Shape::HexFromDiameter(c) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Replaces the box record, keeping the kind.
    pub fn with_box(&self, coords: BoxCoords) -> Self {
        Shape::from_box(self.kind(), coords).unwrap_or_else(|| self.clone())
    }

    /// Replaces the circle record, keeping the kind.
    pub fn with_circle(&self, coords: CircleCoords) -> Self {
        Shape::from_circle(self.kind(), coords).unwrap_or_else(|| self.clone())
    }

    pub fn tilt(&self) -> Tilt {
        self.box_coords().map(|c| c.tilt).unwrap_or_default()
    }

    /// Same shape with another tilt; kinds without a tilt are returned as is.
    pub fn with_tilt(&self, tilt: Tilt) -> Self {
        match self.box_coords() {
            Some(c) if self.kind().uses_tilt() => self.with_box(c.with_tilt(tilt)),
            _ => self.clone(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::HexFromDiameter(c) => regular_hex_bounds(c),
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) => c.bounds(),
            Shape::Polygon(points) => polygon::polygon_bounds(points),
            _ => self.box_coords().map(|c| c.bounds()).unwrap_or(Bounds::new(0, 0, 0, 0)),
        }
    }

    pub fn center(&self) -> PointF {
        match self.circle_coords() {
            Some(c) => c.center().to_f64(),
            None => self.bounds().center(),
        }
    }

    /// Exact vertex list. `None` for circles and ellipses, which callers
    /// test analytically.
    pub fn vertices_f64(&self) -> Option<SmallVec<[PointF; 6]>> {
        match self {
            Shape::Rectangle(c) | Shape::Square(c) => {
                Some(rectangle_corners(c).iter().map(|p| p.to_f64()).collect())
            }
            Shape::Rhombus(c) => Some(c.place_template(&rectangle::RHOMBUS_TEMPLATE)),
            Shape::IsoscelesTriangle(c) | Shape::EquilateralTriangle(c) => {
                Some(triangle::apex_triangle_vertices(c))
            }
            Shape::RightTriangle(c) => Some(triangle::right_triangle_vertices(c)),
            Shape::HexFromRectangle(c) => Some(rect_hex_vertices(c)),
            Shape::HexFromDiameter(c) => Some(regular_hex_vertices(c)),
            Shape::Polygon(points) => Some(points.iter().map(|p| p.to_f64()).collect()),
            Shape::Ellipse(_) | Shape::CircleFromCenter(_) | Shape::CircleFromDiameter(_) => None,
        }
    }

    /// Vertex list rounded to pixels.
    pub fn vertices(&self) -> Option<Vec<Point>> {
        match self {
            Shape::Polygon(points) => Some(points.clone()),
            _ => self
                .vertices_f64()
                .map(|v| v.into_iter().map(PointF::round).collect()),
        }
    }

    pub fn outline(&self) -> Outline {
        match self {
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) => Outline::Circle {
                center: c.center().to_f64(),
                radius: c.r as f64,
            },
            Shape::Ellipse(c) => Outline::Ellipse {
                center: c.center(),
                rx: c.width as f64 / 2.0,
                ry: c.height as f64 / 2.0,
            },
            _ => Outline::Polygon(self.vertices_f64().map(|v| v.to_vec()).unwrap_or_default()),
        }
    }

    /// Kind-specific validity predicate.
    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Rectangle(c)
            | Shape::Rhombus(c)
            | Shape::Ellipse(c)
            | Shape::IsoscelesTriangle(c)
            | Shape::HexFromRectangle(c) => c.has_area(),
            Shape::Square(c) => c.has_area() && c.width == c.height,
            Shape::EquilateralTriangle(c) => is_equilateral(c),
            Shape::RightTriangle(c) => is_right_isosceles(c),
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) | Shape::HexFromDiameter(c) => {
                c.r > 0
            }
            Shape::Polygon(points) => is_valid_polygon(points),
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        match self {
            Shape::Polygon(points) => Shape::Polygon(polygon::translate_points(points, dx, dy)),
            _ => match (self.box_coords(), self.circle_coords()) {
                (Some(c), _) => self.with_box(c.translated(dx, dy)),
                (_, Some(c)) => self.with_circle(c.translated(dx, dy)),
                _ => self.clone(),
            },
        }
    }

    /// Moves the shape so its bounding box starts at `(x, y)`.
    pub fn with_origin(&self, x: i32, y: i32) -> Self {
        let b = self.bounds();
        self.translated(x - b.min_x, y - b.min_y)
    }

    /// Hit test against the filled shape.
    pub fn contains_point(&self, p: PointF) -> bool {
        match self {
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) => c.contains_point(p),
            Shape::Ellipse(c) => {
                let center = c.center();
                let rx = c.width as f64 / 2.0;
                let ry = c.height as f64 / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (p.x - center.x) / rx;
                let ny = (p.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            _ => self
                .vertices_f64()
                .is_some_and(|v| crate::predicates::point_in_polygon(p, &v)),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_wraps_in_both_directions() {
        assert_eq!(Tilt::Deg0.turned(-1), Tilt::Deg270);
        assert_eq!(Tilt::Deg270.turned(1), Tilt::Deg0);
        assert_eq!(Tilt::from_degrees(-90), Some(Tilt::Deg270));
        assert_eq!(Tilt::from_degrees(45), None);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_with_origin_moves_circle_by_bounds() {
        let circle = Shape::CircleFromCenter(CircleCoords::new(50, 50, 5));
        let moved = circle.with_origin(0, 0);
        assert_eq!(moved, Shape::CircleFromCenter(CircleCoords::new(5, 5, 5)));
    }

    #[test]
    fn test_square_requires_equal_sides() {
        assert!(Shape::Square(BoxCoords::new(0, 0, 5, 5)).is_valid());
        assert!(!Shape::Square(BoxCoords::new(0, 0, 5, 6)).is_valid());
        assert!(!Shape::Rectangle(BoxCoords::new(0, 0, 0, 6)).is_valid());
    }
}
