use imagemapper_core::{Point, Size};

use super::{DeltaBounds, Handle};

fn vertex_index(points: &[Point], handle: Handle) -> Option<usize> {
    match handle {
        Handle::Vertex(i) if i < points.len() => Some(i),
        _ => None,
    }
}

pub(crate) fn position(points: &[Point], handle: Handle) -> Option<Point> {
    vertex_index(points, handle).map(|i| points[i])
}

/// A vertex may travel anywhere on the canvas.
pub(crate) fn bounds(points: &[Point], handle: Handle, canvas: Size) -> Option<DeltaBounds> {
    let p = position(points, handle)?;
    Some(DeltaBounds::new(-p.x, canvas.width - p.x, -p.y, canvas.height - p.y))
}

pub(crate) fn apply(points: &[Point], handle: Handle, dx: i32, dy: i32) -> Option<Vec<Point>> {
    let i = vertex_index(points, handle)?;
    let mut moved = points.to_vec();
    moved[i] = moved[i].translated(dx, dy);
    Some(moved)
}
