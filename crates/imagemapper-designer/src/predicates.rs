//! Containment and intersection predicates.
//!
//! The grid engine converts its scope shape to a [`Region`] and asks, per
//! candidate tile [`Outline`], whether the candidate is [`contained`] in the
//! region (inner scope mode) or [`intersects`] it (outer scope mode).
//!
//! Convex regions store their vertices with a positive shoelace area
//! (clockwise on screen), so the interior of every edge has a non-negative
//! [`line_value`].

use imagemapper_core::{Bounds, PointF};

use crate::model::{signed_area2, Outline, Shape, ELLIPSE_SEGMENTS};

const EPS: f64 = 1e-9;

/// Scope geometry, built once per recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Rect(Bounds),
    Circle { center: PointF, radius: f64 },
    Ellipse { center: PointF, rx: f64, ry: f64 },
    Convex(Vec<PointF>),
    Polygon(Vec<PointF>),
}

impl Region {
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle(_) | Shape::Square(_) => Region::Rect(shape.bounds()),
            Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) => Region::Circle {
                center: c.center().to_f64(),
                radius: c.r as f64,
            },
            Shape::Ellipse(c) => Region::Ellipse {
                center: c.center(),
                rx: c.width as f64 / 2.0,
                ry: c.height as f64 / 2.0,
            },
            Shape::Polygon(points) => {
                Region::Polygon(points.iter().map(|p| p.to_f64()).collect())
            }
            _ => {
                let vertices = shape.vertices_f64().map(|v| v.to_vec()).unwrap_or_default();
                Region::Convex(clockwise(vertices))
            }
        }
    }

    /// Rectangular scopes need no filtering beyond bounding-box truncation.
    pub fn is_rectangular(&self) -> bool {
        matches!(self, Region::Rect(_))
    }

    /// Closed-region membership of a single point.
    pub fn contains_point(&self, p: PointF) -> bool {
        match self {
            Region::Rect(b) => b.contains_point(p),
            Region::Circle { center, radius } => center.distance_to(&p) <= radius + EPS,
            Region::Ellipse { center, rx, ry } => {
                unit_circle_point(p, *center, *rx, *ry).is_some_and(|q| q.x * q.x + q.y * q.y <= 1.0 + EPS)
            }
            Region::Convex(vertices) => inside_all_edges(p, vertices, -EPS),
            Region::Polygon(vertices) => {
                point_in_polygon(p, vertices) || on_polygon_boundary(p, vertices)
            }
        }
    }

    /// Membership of a point in the open interior.
    fn strictly_contains_point(&self, p: PointF) -> bool {
        match self {
            Region::Rect(b) => {
                p.x > b.min_x as f64 && p.x < b.max_x as f64 && p.y > b.min_y as f64 && p.y < b.max_y as f64
            }
            Region::Circle { center, radius } => center.distance_to(&p) < radius - EPS,
            Region::Ellipse { center, rx, ry } => {
                unit_circle_point(p, *center, *rx, *ry).is_some_and(|q| q.x * q.x + q.y * q.y < 1.0 - EPS)
            }
            Region::Convex(vertices) => inside_all_edges(p, vertices, EPS),
            Region::Polygon(vertices) => {
                point_in_polygon(p, vertices) && !on_polygon_boundary(p, vertices)
            }
        }
    }

    /// Boundary as a polygon, for the rectangle and polygonal regions.
    fn boundary(&self) -> Option<Vec<PointF>> {
        match self {
            Region::Rect(b) => Some(vec![
                PointF::new(b.min_x as f64, b.min_y as f64),
                PointF::new(b.max_x as f64, b.min_y as f64),
                PointF::new(b.max_x as f64, b.max_y as f64),
                PointF::new(b.min_x as f64, b.max_y as f64),
            ]),
            Region::Convex(v) | Region::Polygon(v) => Some(v.clone()),
            Region::Circle { .. } | Region::Ellipse { .. } => None,
        }
    }
}

/// Every point of the candidate lies within the closed region.
pub fn contained(region: &Region, outline: &Outline) -> bool {
    match (region, outline) {
        (Region::Circle { center, radius }, Outline::Circle { center: c, radius: r }) => {
            center.distance_to(c) + r <= radius + EPS
        }
        (Region::Convex(vertices), Outline::Circle { center, radius }) => {
            inside_all_edges(*center, vertices, -EPS)
                && edges(vertices).all(|(a, b)| signed_distance(a, b, *center) >= radius - EPS)
        }
        (Region::Rect(b), Outline::Circle { center, radius }) => {
            center.x - radius >= b.min_x as f64 - EPS
                && center.x + radius <= b.max_x as f64 + EPS
                && center.y - radius >= b.min_y as f64 - EPS
                && center.y + radius <= b.max_y as f64 + EPS
        }
        (Region::Polygon(vertices), Outline::Circle { center, radius }) => {
            point_in_polygon(*center, vertices)
                && edges(vertices).all(|(a, b)| point_segment_distance(*center, a, b) >= radius - EPS)
        }
        (Region::Polygon(vertices), _) => {
            let points = outline.sample(ELLIPSE_SEGMENTS);
            points.iter().all(|p| region.contains_point(*p))
                && !closed_edges(&points).any(|(a, b)| {
                    edges(vertices).any(|(c, d)| segments_cross(a, b, c, d))
                })
        }
        _ => outline
            .sample(ELLIPSE_SEGMENTS)
            .iter()
            .all(|p| region.contains_point(*p)),
    }
}

/// At least one candidate point lies strictly inside the region, or the
/// candidate boundary crosses the region boundary, or the region lies
/// inside the candidate. Touching boundaries do not intersect.
pub fn intersects(region: &Region, outline: &Outline) -> bool {
    match (region, outline) {
        (Region::Circle { center, radius }, Outline::Circle { center: c, radius: r }) => {
            center.distance_to(c) < radius + r - EPS
        }
        (Region::Circle { center, radius }, _) => {
            polygon_meets_circle(&outline.sample(ELLIPSE_SEGMENTS), *center, *radius)
        }
        (Region::Ellipse { center, rx, ry }, _) => {
            let mapped: Option<Vec<PointF>> = outline
                .sample(ELLIPSE_SEGMENTS)
                .into_iter()
                .map(|p| unit_circle_point(p, *center, *rx, *ry))
                .collect();
            mapped.is_some_and(|points| polygon_meets_circle(&points, PointF::new(0.0, 0.0), 1.0))
        }
        (_, Outline::Circle { center, radius }) => {
            let Some(boundary) = region.boundary() else {
                return false;
            };
            region.strictly_contains_point(*center)
                || edges(&boundary).any(|(a, b)| point_segment_distance(*center, a, b) < radius - EPS)
        }
        _ => {
            let Some(boundary) = region.boundary() else {
                return false;
            };
            let points = outline.sample(ELLIPSE_SEGMENTS);
            points.iter().any(|p| region.strictly_contains_point(*p))
                || closed_edges(&points)
                    .any(|(a, b)| edges(&boundary).any(|(c, d)| segments_cross(a, b, c, d)))
                || boundary.iter().any(|v| point_in_polygon(*v, &points) && !on_polygon_boundary(*v, &points))
        }
    }
}

/// Signed value of `p` against the directed line `a -> b`; positive on the
/// interior side of a clockwise-on-screen polygon.
pub fn line_value(a: PointF, b: PointF, p: PointF) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

fn signed_distance(a: PointF, b: PointF, p: PointF) -> f64 {
    let len = a.distance_to(&b);
    if len <= EPS {
        return a.distance_to(&p);
    }
    line_value(a, b, p) / len
}

/// Even-odd ray casting.
pub fn point_in_polygon(p: PointF, polygon: &[PointF]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Roots of the segment / circle intersection along the segment parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleRoots {
    /// The supporting line misses the circle.
    None,
    /// The supporting line touches the circle.
    Tangent(f64),
    /// The supporting line enters and leaves the circle.
    Two(f64, f64),
}

/// Solves `|a + t (b - a) - center| = radius` for `t`.
pub fn line_circle_roots(a: PointF, b: PointF, center: PointF, radius: f64) -> CircleRoots {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (fx, fy) = (a.x - center.x, a.y - center.y);
    let qa = dx * dx + dy * dy;
    if qa <= EPS {
        return CircleRoots::None;
    }
    let qb = 2.0 * (fx * dx + fy * dy);
    let qc = fx * fx + fy * fy - radius * radius;
    let discriminant = qb * qb - 4.0 * qa * qc;
    let scale = qb * qb + (4.0 * qa * qc).abs();
    if discriminant.abs() <= EPS * scale.max(1.0) {
        CircleRoots::Tangent(-qb / (2.0 * qa))
    } else if discriminant < 0.0 {
        CircleRoots::None
    } else {
        let sq = discriminant.sqrt();
        CircleRoots::Two((-qb - sq) / (2.0 * qa), (-qb + sq) / (2.0 * qa))
    }
}

/// The open chord of the circle overlaps the segment `a -> b`.
pub fn segment_crosses_circle(a: PointF, b: PointF, center: PointF, radius: f64) -> bool {
    match line_circle_roots(a, b, center, radius) {
        CircleRoots::Two(t1, t2) => t1 < 1.0 && t2 > 0.0,
        CircleRoots::Tangent(_) | CircleRoots::None => false,
    }
}

/// Proper crossing of two segments; touching or collinear segments do not
/// cross.
pub fn segments_cross(a: PointF, b: PointF, c: PointF, d: PointF) -> bool {
    let d1 = line_value(c, d, a);
    let d2 = line_value(c, d, b);
    let d3 = line_value(a, b, c);
    let d4 = line_value(a, b, d);
    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

pub fn point_segment_distance(p: PointF, a: PointF, b: PointF) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= EPS {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance_to(&PointF::new(a.x + t * dx, a.y + t * dy))
}

fn polygon_meets_circle(points: &[PointF], center: PointF, radius: f64) -> bool {
    points.iter().any(|p| center.distance_to(p) < radius - EPS)
        || closed_edges(points).any(|(a, b)| segment_crosses_circle(a, b, center, radius))
        || point_in_polygon(center, points)
}

fn unit_circle_point(p: PointF, center: PointF, rx: f64, ry: f64) -> Option<PointF> {
    if rx <= EPS || ry <= EPS {
        return None;
    }
    Some(PointF::new((p.x - center.x) / rx, (p.y - center.y) / ry))
}

fn inside_all_edges(p: PointF, vertices: &[PointF], margin: f64) -> bool {
    vertices.len() >= 3 && edges(vertices).all(|(a, b)| line_value(a, b, p) >= margin)
}

fn on_polygon_boundary(p: PointF, vertices: &[PointF]) -> bool {
    edges(vertices).any(|(a, b)| point_segment_distance(p, a, b) <= EPS)
}

fn edges(vertices: &[PointF]) -> impl Iterator<Item = (PointF, PointF)> + '_ {
    closed_edges(vertices)
}

fn closed_edges(vertices: &[PointF]) -> impl Iterator<Item = (PointF, PointF)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

fn clockwise(mut vertices: Vec<PointF>) -> Vec<PointF> {
    if signed_area2(&vertices) < 0.0 {
        vertices.reverse();
    }
    vertices
}
