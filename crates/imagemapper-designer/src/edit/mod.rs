//! Edit and constraint engine.
//!
//! Every shape kind exposes a set of [`Handle`]s. For each handle the engine
//! answers three questions without touching the shape:
//!
//! - where the handle sits ([`handle_position`]),
//! - how far the cursor may travel before the candidate becomes invalid or
//!   leaves the canvas ([`drag_bounds`]),
//! - what the shape looks like after a given delta ([`apply_delta`]).
//!
//! Tilted kinds (triangles and the hex drawn from a rectangle) express their
//! algebra once, in the upright frame; [`frame::Frame`] maps handles, deltas
//! and bounds between that frame and the canvas.
//!
//! Failures are [`Rejection`]s: expected outcomes the caller reports and
//! recovers from by keeping the committed shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use imagemapper_core::{GridError, Point, PointF, Size};

use crate::model::{BoxCoords, Shape, ShapeKind};

mod circle;
mod frame;
mod hexagon;
mod polygon;
mod rectangle;
mod session;
mod transform;
mod triangle;

pub use rectangle::half_round;
pub use session::{DragKind, DragSession};
pub use transform::{move_apply, move_bounds, move_bounds_all, rotate};

use frame::Frame;

/// Draggable control point of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Handle {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    /// Polygon vertex by index.
    Vertex(usize),
}

impl Handle {
    /// Compass handles in clockwise order; one quarter turn is two steps.
    pub const COMPASS: [Handle; 8] = [
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
        Handle::TopLeft,
    ];

    /// The handle found at the same place after turning the shape clockwise
    /// by `turns` quarter turns.
    pub fn turned(self, turns: i32) -> Self {
        match Self::COMPASS.iter().position(|h| *h == self) {
            Some(i) => Self::COMPASS[(i as i32 + 2 * turns).rem_euclid(8) as usize],
            None => self,
        }
    }

    /// Location on the unit box, `None` for polygon vertices.
    pub fn unit_position(self) -> Option<(f64, f64)> {
        Some(match self {
            Handle::Top => (0.5, 0.0),
            Handle::TopRight => (1.0, 0.0),
            Handle::Right => (1.0, 0.5),
            Handle::BottomRight => (1.0, 1.0),
            Handle::Bottom => (0.5, 1.0),
            Handle::BottomLeft => (0.0, 1.0),
            Handle::Left => (0.0, 0.5),
            Handle::TopLeft => (0.0, 0.0),
            Handle::Vertex(_) => return None,
        })
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomRight | Handle::BottomLeft
        )
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Vertex(i) => write!(f, "vertex {i}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Admissible cursor delta, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeltaBounds {
    pub dx_min: i32,
    pub dx_max: i32,
    pub dy_min: i32,
    pub dy_max: i32,
}

impl DeltaBounds {
    pub const fn new(dx_min: i32, dx_max: i32, dy_min: i32, dy_max: i32) -> Self {
        Self {
            dx_min,
            dx_max,
            dy_min,
            dy_max,
        }
    }

    /// Only the zero delta.
    pub const fn fixed() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// No delta at all is admissible; the shape already violates a bound.
    pub fn is_empty(&self) -> bool {
        self.dx_min > self.dx_max || self.dy_min > self.dy_max
    }

    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        (self.dx_min..=self.dx_max).contains(&dx) && (self.dy_min..=self.dy_max).contains(&dy)
    }

    /// Nearest admissible delta. Returns `None` when the bounds are empty.
    pub fn clamp(&self, dx: i32, dy: i32) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        Some((dx.clamp(self.dx_min, self.dx_max), dy.clamp(self.dy_min, self.dy_max)))
    }

    pub fn intersect(&self, other: &DeltaBounds) -> Self {
        Self::new(
            self.dx_min.max(other.dx_min),
            self.dx_max.min(other.dx_max),
            self.dy_min.max(other.dy_min),
            self.dy_max.min(other.dy_max),
        )
    }

    /// Bounds after one clockwise quarter turn of the frame.
    pub(crate) fn turned(&self) -> Self {
        Self::new(-self.dy_max, -self.dy_min, self.dx_min, self.dx_max)
    }
}

impl fmt::Display for DeltaBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dx {}..={}, dy {}..={}",
            self.dx_min, self.dx_max, self.dy_min, self.dy_max
        )
    }
}

/// Why a commit was refused. The committed shape is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The candidate leaves the canvas
    #[error("Candidate leaves the canvas")]
    OutOfBounds,

    /// The candidate fails its kind's validity predicate
    #[error("Candidate geometry is invalid")]
    InvalidGeometry,

    /// The operation is not defined for the kind
    #[error("{kind} does not support {operation}")]
    Unsupported {
        /// The shape kind.
        kind: ShapeKind,
        /// The refused operation.
        operation: &'static str,
    },

    /// The handle does not exist on this shape
    #[error("{kind} has no handle {handle}")]
    UnknownHandle {
        /// The shape kind.
        kind: ShapeKind,
        /// The requested handle.
        handle: Handle,
    },

    /// No shape with this id
    #[error("Shape {0} not found")]
    ShapeNotFound(u64),

    /// A grid affected by the commit could not be recomputed
    #[error(transparent)]
    GridConfiguration(#[from] GridError),
}

/// Quarter-turn rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    pub fn quarter_turns(self) -> i32 {
        match self {
            RotateDirection::Clockwise => 1,
            RotateDirection::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            RotateDirection::Clockwise => RotateDirection::CounterClockwise,
            RotateDirection::CounterClockwise => RotateDirection::Clockwise,
        }
    }
}

const RECTANGLE_HANDLES: [Handle; 8] = Handle::COMPASS;
const SQUARE_HANDLES: [Handle; 4] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::BottomRight,
    Handle::BottomLeft,
];
const EDGE_HANDLES: [Handle; 4] = [Handle::Top, Handle::Right, Handle::Bottom, Handle::Left];
const RADIAL_HANDLES: [Handle; 2] = [Handle::Right, Handle::Left];

/// Handles of the upright (tilt 0) frame.
fn frame_handles(kind: ShapeKind) -> &'static [Handle] {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Ellipse => &RECTANGLE_HANDLES,
        ShapeKind::Square => &SQUARE_HANDLES,
        ShapeKind::Rhombus | ShapeKind::CircleFromCenter | ShapeKind::CircleFromDiameter => {
            &EDGE_HANDLES
        }
        ShapeKind::HexFromDiameter => &RADIAL_HANDLES,
        ShapeKind::IsoscelesTriangle => &triangle::ISOSCELES_HANDLES,
        ShapeKind::EquilateralTriangle => &triangle::EQUILATERAL_HANDLES,
        ShapeKind::RightTriangle => &triangle::RIGHT_HANDLES,
        ShapeKind::HexFromRectangle => &hexagon::HEX_HANDLES,
        ShapeKind::Polygon => &[],
    }
}

/// Every handle the shape currently exposes, in canvas orientation.
pub fn handles(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Polygon(points) => (0..points.len()).map(Handle::Vertex).collect(),
        _ => {
            let turns = Frame::turns_of(shape);
            frame_handles(shape.kind())
                .iter()
                .map(|h| h.turned(turns as i32))
                .collect()
        }
    }
}

fn unknown(shape: &Shape, handle: Handle) -> Rejection {
    Rejection::UnknownHandle {
        kind: shape.kind(),
        handle,
    }
}

/// Maps a canvas handle into the upright frame, checking it exists.
fn frame_handle(shape: &Shape, frame: &Frame, handle: Handle) -> Result<Handle, Rejection> {
    let local = frame.handle_to_frame(handle);
    if frame_handles(shape.kind()).contains(&local) {
        Ok(local)
    } else {
        Err(unknown(shape, handle))
    }
}

pub fn handle_position(shape: &Shape, handle: Handle) -> Result<Point, Rejection> {
    match shape {
        Shape::Polygon(points) => polygon::position(points, handle).ok_or_else(|| unknown(shape, handle)),
        _ => match (shape.box_coords(), shape.circle_coords()) {
            (Some(coords), _) => {
                let frame = Frame::detached(shape);
                let local = frame_handle(shape, &frame, handle)?;
                let upright = frame.box_to_frame(coords);
                let p = box_position(shape.kind(), &upright, local).ok_or_else(|| unknown(shape, handle))?;
                Ok(frame.point_to_canvas(p).round())
            }
            (_, Some(coords)) => {
                if !frame_handles(shape.kind()).contains(&handle) {
                    return Err(unknown(shape, handle));
                }
                circle::position(coords, handle).ok_or_else(|| unknown(shape, handle))
            }
            _ => Err(unknown(shape, handle)),
        },
    }
}

/// Admissible cursor delta for dragging `handle` on a `canvas`-sized image.
pub fn drag_bounds(shape: &Shape, handle: Handle, canvas: Size) -> Result<DeltaBounds, Rejection> {
    match shape {
        Shape::Polygon(points) => {
            polygon::bounds(points, handle, canvas).ok_or_else(|| unknown(shape, handle))
        }
        Shape::HexFromDiameter(coords) => {
            if !RADIAL_HANDLES.contains(&handle) {
                return Err(unknown(shape, handle));
            }
            circle::bounds(coords, handle, hexagon::max_regular_radius(coords, canvas))
                .ok_or_else(|| unknown(shape, handle))
        }
        Shape::CircleFromCenter(coords) | Shape::CircleFromDiameter(coords) => {
            if !EDGE_HANDLES.contains(&handle) {
                return Err(unknown(shape, handle));
            }
            circle::bounds(coords, handle, circle::max_circle_radius(coords, canvas))
                .ok_or_else(|| unknown(shape, handle))
        }
        _ => {
            let coords = shape.box_coords().ok_or_else(|| unknown(shape, handle))?;
            let frame = Frame::new(shape, canvas);
            let local = frame_handle(shape, &frame, handle)?;
            let upright = frame.box_to_frame(coords);
            let bounds = box_bounds(shape.kind(), &upright, local, frame.frame_canvas())
                .ok_or_else(|| unknown(shape, handle))?;
            Ok(frame.bounds_to_canvas(bounds))
        }
    }
}

/// Candidate shape after dragging `handle` by a delta already clamped into
/// [`drag_bounds`]. The candidate is not validated.
pub fn apply_delta(shape: &Shape, handle: Handle, dx: i32, dy: i32) -> Result<Shape, Rejection> {
    match shape {
        Shape::Polygon(points) => polygon::apply(points, handle, dx, dy)
            .map(Shape::Polygon)
            .ok_or_else(|| unknown(shape, handle)),
        Shape::HexFromDiameter(coords) => {
            if !RADIAL_HANDLES.contains(&handle) {
                return Err(unknown(shape, handle));
            }
            circle::apply(coords, handle, dx, dy)
                .map(|c| shape.with_circle(c))
                .ok_or_else(|| unknown(shape, handle))
        }
        Shape::CircleFromCenter(coords) | Shape::CircleFromDiameter(coords) => {
            if !EDGE_HANDLES.contains(&handle) {
                return Err(unknown(shape, handle));
            }
            circle::apply(coords, handle, dx, dy)
                .map(|c| shape.with_circle(c))
                .ok_or_else(|| unknown(shape, handle))
        }
        _ => {
            let coords = shape.box_coords().ok_or_else(|| unknown(shape, handle))?;
            let frame = Frame::detached(shape);
            let local = frame_handle(shape, &frame, handle)?;
            let upright = frame.box_to_frame(coords);
            let (du, dv) = frame.delta_to_frame(dx, dy);
            let moved = box_apply(shape.kind(), &upright, local, du, dv)
                .ok_or_else(|| unknown(shape, handle))?;
            Ok(shape.with_box(frame.box_to_canvas(&moved, coords.tilt)))
        }
    }
}

/// Full commit check of a handle drag: the delta must lie inside the drag
/// bounds and the candidate must be valid and on the canvas.
pub fn edit_shape(
    shape: &Shape,
    handle: Handle,
    dx: i32,
    dy: i32,
    canvas: Size,
) -> Result<Shape, Rejection> {
    let bounds = drag_bounds(shape, handle, canvas)?;
    if !bounds.contains(dx, dy) {
        return Err(Rejection::OutOfBounds);
    }
    let candidate = apply_delta(shape, handle, dx, dy)?;
    validate(&candidate, canvas)?;
    Ok(candidate)
}

/// Commit-time check shared by every operation.
pub fn validate(candidate: &Shape, canvas: Size) -> Result<(), Rejection> {
    if !candidate.is_valid() {
        return Err(Rejection::InvalidGeometry);
    }
    if !fits_canvas(candidate, canvas) {
        return Err(Rejection::OutOfBounds);
    }
    Ok(())
}

pub(crate) fn fits_canvas(shape: &Shape, canvas: Size) -> bool {
    let b = shape.bounds();
    b.min_x >= 0 && b.min_y >= 0 && b.max_x <= canvas.width && b.max_y <= canvas.height
}

fn box_position(kind: ShapeKind, coords: &BoxCoords, handle: Handle) -> Option<PointF> {
    match kind {
        ShapeKind::HexFromRectangle => hexagon::position(coords, handle),
        _ => handle.unit_position().map(|(u, v)| coords.at_unit(u, v)),
    }
}

fn box_bounds(
    kind: ShapeKind,
    coords: &BoxCoords,
    handle: Handle,
    canvas: Size,
) -> Option<DeltaBounds> {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Rhombus | ShapeKind::HexFromRectangle => {
            Some(rectangle::side_bounds(coords, handle, canvas))
        }
        ShapeKind::Square => Some(rectangle::diagonal_bounds(coords, handle, canvas)),
        ShapeKind::IsoscelesTriangle => triangle::isosceles_bounds(coords, handle, canvas),
        ShapeKind::EquilateralTriangle => triangle::equilateral_bounds(coords, handle, canvas),
        ShapeKind::RightTriangle => triangle::right_bounds(coords, handle, canvas),
        _ => None,
    }
}

fn box_apply(
    kind: ShapeKind,
    coords: &BoxCoords,
    handle: Handle,
    dx: i32,
    dy: i32,
) -> Option<BoxCoords> {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Rhombus | ShapeKind::HexFromRectangle => {
            Some(rectangle::apply_sides(coords, handle, dx, dy))
        }
        ShapeKind::Square => Some(rectangle::apply_diagonal(coords, handle, dx, dy)),
        ShapeKind::IsoscelesTriangle => triangle::isosceles_apply(coords, handle, dx, dy),
        ShapeKind::EquilateralTriangle => triangle::equilateral_apply(coords, handle, dx, dy),
        ShapeKind::RightTriangle => triangle::right_apply(coords, handle, dx, dy),
        _ => None,
    }
}
