//! Whole-shape move and quarter-turn rotation.

use imagemapper_core::Size;

use super::{fits_canvas, half_round, DeltaBounds, Rejection, RotateDirection};
use crate::model::{BoxCoords, Shape};

/// Translation range keeping the bounding box on the canvas. Polygons are
/// bounded by their extreme vertices.
pub fn move_bounds(shape: &Shape, canvas: Size) -> DeltaBounds {
    let b = shape.bounds();
    DeltaBounds::new(
        -b.min_x,
        canvas.width - b.max_x,
        -b.min_y,
        canvas.height - b.max_y,
    )
}

/// Common translation range of several shapes moved together.
pub fn move_bounds_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>, canvas: Size) -> DeltaBounds {
    shapes.into_iter().fold(
        DeltaBounds::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX),
        |acc, shape| acc.intersect(&move_bounds(shape, canvas)),
    )
}

pub fn move_apply(shape: &Shape, dx: i32, dy: i32) -> Shape {
    shape.translated(dx, dy)
}

/// Swaps the box sides around its center. `half_round` keeps a clockwise
/// turn followed by a counter-clockwise turn exact.
fn swap_sides(coords: &BoxCoords) -> BoxCoords {
    let (w, h) = (coords.width, coords.height);
    BoxCoords {
        x: coords.x + half_round(w - h),
        y: coords.y + half_round(h - w),
        width: h,
        height: w,
        tilt: coords.tilt,
    }
}

/// Rotates a shape by 90 degrees around its center.
pub fn rotate(shape: &Shape, direction: RotateDirection, canvas: Size) -> Result<Shape, Rejection> {
    let candidate = match shape {
        Shape::Square(_) | Shape::CircleFromCenter(_) | Shape::CircleFromDiameter(_) => {
            return Ok(shape.clone())
        }
        Shape::Polygon(_) | Shape::HexFromDiameter(_) => {
            return Err(Rejection::Unsupported {
                kind: shape.kind(),
                operation: "rotation",
            })
        }
        Shape::Rectangle(c) | Shape::Ellipse(c) | Shape::Rhombus(c) => shape.with_box(swap_sides(c)),
        Shape::IsoscelesTriangle(c)
        | Shape::EquilateralTriangle(c)
        | Shape::RightTriangle(c)
        | Shape::HexFromRectangle(c) => {
            let swapped = swap_sides(c);
            shape.with_box(swapped.with_tilt(c.tilt.turned(direction.quarter_turns())))
        }
    };
    if !fits_canvas(&candidate, canvas) {
        return Err(Rejection::OutOfBounds);
    }
    Ok(candidate)
}
