//! Drawing sessions.
//!
//! A session turns a press / drag / release sequence into a shape. Box and
//! circle kinds finish on the first release; polygons collect one vertex per
//! release and finish when a release lands close to their first vertex.

use imagemapper_core::{Point, Size};

use crate::edit::{validate, Rejection};
use crate::model::{equilateral_apex_for_base, BoxCoords, CircleCoords, Shape, ShapeKind};

/// Default distance, in pixels, within which a click closes a polygon.
pub const POLYGON_CLOSE_DISTANCE: f64 = 10.0;

/// Result of releasing the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    Done(Shape),
    /// The polygon needs more vertices.
    Continue,
    Error(Rejection),
}

#[derive(Debug, Clone)]
pub struct DrawSession {
    kind: ShapeKind,
    start: Point,
    vertices: Vec<Point>,
    canvas: Option<Size>,
    close_distance: f64,
}

impl DrawSession {
    pub fn start(kind: ShapeKind, point: Point) -> Self {
        Self {
            kind,
            start: point,
            vertices: vec![point],
            canvas: None,
            close_distance: POLYGON_CLOSE_DISTANCE,
        }
    }

    /// Rejects finished shapes that leave a `size` canvas.
    pub fn on_canvas(mut self, size: Size) -> Self {
        self.canvas = Some(size);
        self
    }

    pub fn with_close_distance(mut self, distance: f64) -> Self {
        self.close_distance = distance;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Polygon vertices collected so far.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Candidate for the cursor at `point`, if it has any extent yet.
    pub fn progress(&self, point: Point) -> Option<Shape> {
        if self.kind == ShapeKind::Polygon {
            let mut points = self.vertices.clone();
            points.push(point);
            return (points.len() >= 3).then_some(Shape::Polygon(points));
        }
        candidate(self.kind, self.start, point)
    }

    pub fn end(&mut self, point: Point) -> DrawOutcome {
        if self.kind == ShapeKind::Polygon {
            return self.add_vertex(point);
        }
        match candidate(self.kind, self.start, point) {
            Some(shape) => self.finish(shape),
            None => DrawOutcome::Error(Rejection::InvalidGeometry),
        }
    }

    fn add_vertex(&mut self, point: Point) -> DrawOutcome {
        let closes = self
            .vertices
            .first()
            .is_some_and(|first| first.distance_to(&point) <= self.close_distance);
        if closes && self.vertices.len() >= 3 {
            return self.finish(Shape::Polygon(self.vertices.clone()));
        }
        if self.vertices.last() != Some(&point) {
            self.vertices.push(point);
        }
        DrawOutcome::Continue
    }

    fn finish(&self, shape: Shape) -> DrawOutcome {
        let checked = match self.canvas {
            Some(size) => validate(&shape, size),
            None if shape.is_valid() => Ok(()),
            None => Err(Rejection::InvalidGeometry),
        };
        match checked {
            Ok(()) => DrawOutcome::Done(shape),
            Err(rejection) => DrawOutcome::Error(rejection),
        }
    }
}

/// Box with one corner at `anchor`, extending `width x height` toward the
/// cursor.
fn box_toward(anchor: Point, cursor: Point, width: i32, height: i32) -> BoxCoords {
    let x = if cursor.x < anchor.x { anchor.x - width } else { anchor.x };
    let y = if cursor.y < anchor.y { anchor.y - height } else { anchor.y };
    BoxCoords::new(x, y, width, height)
}

/// Shape spanned by a drag from `start` to `end`.
fn candidate(kind: ShapeKind, start: Point, end: Point) -> Option<Shape> {
    let (w, h) = ((end.x - start.x).abs(), (end.y - start.y).abs());
    match kind {
        ShapeKind::CircleFromCenter => {
            let r = start.distance_to(&end).round() as i32;
            Shape::from_circle(kind, CircleCoords::new(start.x, start.y, r))
        }
        ShapeKind::CircleFromDiameter | ShapeKind::HexFromDiameter => {
            let center = Point::new(
                ((start.x + end.x) as f64 / 2.0).round() as i32,
                ((start.y + end.y) as f64 / 2.0).round() as i32,
            );
            let r = (start.distance_to(&end) / 2.0).round() as i32;
            Shape::from_circle(kind, CircleCoords::new(center.x, center.y, r))
        }
        ShapeKind::Square | ShapeKind::RightTriangle => {
            let side = w.max(h);
            Shape::from_box(kind, box_toward(start, end, side, side))
        }
        ShapeKind::EquilateralTriangle => {
            Shape::from_box(kind, box_toward(start, end, w, equilateral_apex_for_base(w)))
        }
        ShapeKind::Polygon => None,
        _ => Shape::from_box(kind, box_toward(start, end, w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_drawn_up_and_left_is_normalised() {
        let mut session = DrawSession::start(ShapeKind::Rectangle, Point::new(50, 50));
        assert_eq!(
            session.end(Point::new(20, 30)),
            DrawOutcome::Done(Shape::Rectangle(BoxCoords::new(20, 30, 30, 20)))
        );
    }

    #[test]
    fn test_diameter_circle_centers_on_midpoint() {
        let session = DrawSession::start(ShapeKind::CircleFromDiameter, Point::new(10, 10));
        assert_eq!(
            session.progress(Point::new(30, 10)),
            Some(Shape::CircleFromDiameter(CircleCoords::new(20, 10, 10)))
        );
    }

    #[test]
    fn test_square_takes_longer_side() {
        let mut session = DrawSession::start(ShapeKind::Square, Point::new(10, 10));
        assert_eq!(
            session.end(Point::new(14, 30)),
            DrawOutcome::Done(Shape::Square(BoxCoords::new(10, 10, 20, 20)))
        );
    }

    #[test]
    fn test_polygon_closes_near_first_vertex() {
        let mut session = DrawSession::start(ShapeKind::Polygon, Point::new(0, 0));
        assert_eq!(session.end(Point::new(3, 3)), DrawOutcome::Continue);
        assert_eq!(session.vertices().len(), 2);
        assert_eq!(session.end(Point::new(40, 0)), DrawOutcome::Continue);
        assert_eq!(session.end(Point::new(40, 40)), DrawOutcome::Continue);
        match session.end(Point::new(2, 1)) {
            DrawOutcome::Done(Shape::Polygon(points)) => assert_eq!(points.len(), 4),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_click_without_drag_is_invalid() {
        let mut session = DrawSession::start(ShapeKind::Ellipse, Point::new(5, 5));
        assert_eq!(
            session.end(Point::new(5, 5)),
            DrawOutcome::Error(Rejection::InvalidGeometry)
        );
    }

    #[test]
    fn test_shape_off_canvas_is_rejected() {
        let mut session =
            DrawSession::start(ShapeKind::CircleFromCenter, Point::new(5, 5)).on_canvas(Size::new(100, 100));
        assert_eq!(
            session.end(Point::new(25, 5)),
            DrawOutcome::Error(Rejection::OutOfBounds)
        );
    }
}
