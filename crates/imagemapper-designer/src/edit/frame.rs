//! Upright frame of a tilted shape.
//!
//! One clockwise quarter turn `R` of a `cw x ch` canvas maps
//!
//! - a point `(u, v)` to `(ch - v, u)`,
//! - a box `(u, v, w, h)` to `(ch - (v + h), u, h, w)`,
//! - a delta `(du, dv)` to `(-dv, du)`,
//!
//! and yields a `ch x cw` canvas. A shape with tilt `t` is the upright shape
//! turned `t` times, so its algebra runs on the box turned back `t` times.

use imagemapper_core::{PointF, Size};

use super::{DeltaBounds, Handle};
use crate::model::{BoxCoords, Shape, Tilt};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    turns: u8,
    canvas: Size,
}

impl Frame {
    /// Quarter turns separating the shape from its upright frame.
    pub fn turns_of(shape: &Shape) -> u8 {
        if shape.kind().uses_tilt() {
            shape.tilt().quarter_turns()
        } else {
            0
        }
    }

    pub fn new(shape: &Shape, canvas: Size) -> Self {
        Self {
            turns: Self::turns_of(shape),
            canvas,
        }
    }

    /// Frame for canvas-independent mappings. The canvas extent only offsets
    /// coordinates, and a round trip through the frame cancels it.
    pub fn detached(shape: &Shape) -> Self {
        Self::new(shape, Size::default())
    }

    /// Canvas as seen from the upright frame.
    pub fn frame_canvas(&self) -> Size {
        if self.turns % 2 == 1 {
            self.canvas.transposed()
        } else {
            self.canvas
        }
    }

    pub fn handle_to_frame(&self, handle: Handle) -> Handle {
        handle.turned(-(self.turns as i32))
    }

    pub fn box_to_frame(&self, coords: &BoxCoords) -> BoxCoords {
        let mut canvas = self.canvas;
        let (mut x, mut y, mut w, mut h) = (coords.x, coords.y, coords.width, coords.height);
        for _ in 0..self.turns {
            (x, y, w, h) = (y, canvas.width - (x + w), h, w);
            canvas = canvas.transposed();
        }
        BoxCoords::new(x, y, w, h)
    }

    pub fn box_to_canvas(&self, coords: &BoxCoords, tilt: Tilt) -> BoxCoords {
        let mut canvas = self.frame_canvas();
        let (mut x, mut y, mut w, mut h) = (coords.x, coords.y, coords.width, coords.height);
        for _ in 0..self.turns {
            (x, y, w, h) = (canvas.height - (y + h), x, h, w);
            canvas = canvas.transposed();
        }
        BoxCoords::new(x, y, w, h).with_tilt(tilt)
    }

    pub fn point_to_canvas(&self, p: PointF) -> PointF {
        let mut canvas = self.frame_canvas();
        let mut p = p;
        for _ in 0..self.turns {
            p = PointF::new(canvas.height as f64 - p.y, p.x);
            canvas = canvas.transposed();
        }
        p
    }

    pub fn delta_to_frame(&self, dx: i32, dy: i32) -> (i32, i32) {
        let (mut du, mut dv) = (dx, dy);
        for _ in 0..self.turns {
            (du, dv) = (dv, -du);
        }
        (du, dv)
    }

    pub fn bounds_to_canvas(&self, bounds: DeltaBounds) -> DeltaBounds {
        (0..self.turns).fold(bounds, |b, _| b.turned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilted(tilt: Tilt) -> Shape {
        Shape::RightTriangle(BoxCoords::new(30, 10, 20, 20).with_tilt(tilt))
    }

    #[test]
    fn test_box_round_trip_through_frame() {
        for tilt in Tilt::ALL {
            let shape = tilted(tilt);
            let frame = Frame::new(&shape, Size::new(200, 100));
            let coords = shape.box_coords().copied().unwrap_or_default();
            let upright = frame.box_to_frame(&coords);
            assert_eq!(frame.box_to_canvas(&upright, tilt), coords);
        }
    }

    #[test]
    fn test_frame_keeps_shape_on_canvas() {
        let shape = tilted(Tilt::Deg90);
        let frame = Frame::new(&shape, Size::new(200, 100));
        let upright = frame.box_to_frame(shape.box_coords().unwrap());
        let canvas = frame.frame_canvas();
        assert_eq!(canvas, Size::new(100, 200));
        assert!(upright.x >= 0 && upright.x + upright.width <= canvas.width);
        assert!(upright.y >= 0 && upright.y + upright.height <= canvas.height);
    }

    #[test]
    fn test_delta_round_trip() {
        let shape = tilted(Tilt::Deg270);
        let frame = Frame::detached(&shape);
        let (du, dv) = frame.delta_to_frame(3, -7);
        let bounds = frame.bounds_to_canvas(DeltaBounds::new(du, du, dv, dv));
        assert_eq!((bounds.dx_min, bounds.dy_min), (3, -7));
    }
}
