use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use imagemapper_core::{Bounds, Point, PointF, Size};

use super::Tilt;

/// Coordinate record shared by every shape described by its bounding box:
/// the rectangle family, ellipses, triangles and the hex drawn from a
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoxCoords {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub tilt: Tilt,
}

impl BoxCoords {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            tilt: Tilt::Deg0,
        }
    }

    pub const fn with_tilt(mut self, tilt: Tilt) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin(self.x, self.y, self.width, self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> PointF {
        self.bounds().center()
    }

    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Maps a point given in unit box coordinates (`0..=1` on both axes) into
    /// this box.
    pub fn at_unit(&self, u: f64, v: f64) -> PointF {
        PointF::new(
            self.x as f64 + u * self.width as f64,
            self.y as f64 + v * self.height as f64,
        )
    }

    /// Places a tilt-0 template, expressed in unit box coordinates, into the
    /// box after turning it clockwise by the box tilt.
    pub fn place_template(&self, template: &[(f64, f64)]) -> SmallVec<[PointF; 6]> {
        let turns = self.tilt.quarter_turns();
        template
            .iter()
            .map(|&(u, v)| {
                let (u, v) = rotate_unit(u, v, turns);
                self.at_unit(u, v)
            })
            .collect()
    }
}

/// Turns a unit box point clockwise by `turns` quarter turns.
pub(crate) fn rotate_unit(mut u: f64, mut v: f64, turns: u8) -> (f64, f64) {
    for _ in 0..turns % 4 {
        (u, v) = (1.0 - v, u);
    }
    (u, v)
}

pub(crate) const RHOMBUS_TEMPLATE: [(f64, f64); 4] = [(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)];

/// Corner list of an axis-aligned box, clockwise on screen from the top-left.
pub fn rectangle_corners(coords: &BoxCoords) -> SmallVec<[Point; 6]> {
    let b = coords.bounds();
    SmallVec::from_slice(&[
        Point::new(b.min_x, b.min_y),
        Point::new(b.max_x, b.min_y),
        Point::new(b.max_x, b.max_y),
        Point::new(b.min_x, b.max_y),
    ])
}
