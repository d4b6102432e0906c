//! Interactive drags.
//!
//! A session remembers the committed shape and the admissible delta range
//! taken when the drag started. Every cursor update is clamped into that
//! range and produces a fresh candidate; the committed shape is never
//! touched. Dropping the session cancels the drag.

use imagemapper_core::Size;

use super::{apply_delta, drag_bounds, move_apply, move_bounds, validate, DeltaBounds, Handle, Rejection};
use crate::model::Shape;

/// What the cursor is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Handle(Handle),
}

#[derive(Debug, Clone)]
pub struct DragSession {
    original: Shape,
    kind: DragKind,
    bounds: DeltaBounds,
    canvas: Size,
    candidate: Option<Shape>,
}

impl DragSession {
    pub fn begin(shape: &Shape, kind: DragKind, canvas: Size) -> Result<Self, Rejection> {
        let bounds = match kind {
            DragKind::Move => move_bounds(shape, canvas),
            DragKind::Handle(handle) => drag_bounds(shape, handle, canvas)?,
        };
        if bounds.is_empty() {
            return Err(Rejection::OutOfBounds);
        }
        Ok(Self {
            original: shape.clone(),
            kind,
            bounds,
            canvas,
            candidate: None,
        })
    }

    pub fn original(&self) -> &Shape {
        &self.original
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn bounds(&self) -> DeltaBounds {
        self.bounds
    }

    /// Candidate for the cursor delta `(dx, dy)` measured from the drag start.
    pub fn progress(&mut self, dx: i32, dy: i32) -> Result<&Shape, Rejection> {
        let (dx, dy) = self.bounds.clamp(dx, dy).ok_or(Rejection::OutOfBounds)?;
        let candidate = match self.kind {
            DragKind::Move => move_apply(&self.original, dx, dy),
            DragKind::Handle(handle) => apply_delta(&self.original, handle, dx, dy)?,
        };
        Ok(self.candidate.insert(candidate))
    }

    /// Validated candidate ready to commit; the original when the cursor
    /// never moved.
    pub fn finish(self) -> Result<Shape, Rejection> {
        let shape = self.candidate.unwrap_or(self.original);
        validate(&shape, self.canvas)?;
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoxCoords;

    #[test]
    fn test_progress_clamps_to_canvas() {
        let rect = Shape::Rectangle(BoxCoords::new(10, 10, 20, 20));
        let mut session = DragSession::begin(&rect, DragKind::Move, Size::new(100, 100)).unwrap();
        let candidate = session.progress(500, -500).unwrap().clone();
        assert_eq!(candidate, Shape::Rectangle(BoxCoords::new(80, 0, 20, 20)));
        assert_eq!(session.finish().unwrap(), candidate);
    }

    #[test]
    fn test_collapsing_handle_drag_fails_on_finish() {
        let rect = Shape::Rectangle(BoxCoords::new(10, 10, 20, 20));
        let mut session =
            DragSession::begin(&rect, DragKind::Handle(Handle::Right), Size::new(100, 100)).unwrap();
        session.progress(-50, 0).unwrap();
        assert_eq!(session.finish(), Err(Rejection::InvalidGeometry));
    }
}
