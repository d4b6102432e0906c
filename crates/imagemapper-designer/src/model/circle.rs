use serde::{Deserialize, Serialize};

use imagemapper_core::{Bounds, Point, PointF};

/// Center and radius. Circles drawn from their center and from their
/// diameter share this record, as does the regular hexagon drawn from a
/// diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CircleCoords {
    pub x: i32,
    pub y: i32,
    pub r: i32,
}

impl CircleCoords {
    pub const fn new(x: i32, y: i32, r: i32) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x - self.r, self.y - self.r, self.x + self.r, self.y + self.r)
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.r)
    }

    pub fn contains_point(&self, p: PointF) -> bool {
        self.center().to_f64().distance_to(&p) <= self.r as f64
    }
}

/// Largest radius a circle centered at `(x, y)` can have inside a
/// `width x height` canvas.
pub(crate) fn max_radius(x: i32, y: i32, width: i32, height: i32) -> i32 {
    x.min(y).min(width - x).min(height - y)
}
