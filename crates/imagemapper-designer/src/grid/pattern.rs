//! Per-kind interlocking rules.
//!
//! Tiling runs in a frame whose `u` axis follows the rows. A
//! [`PatternProperties`] value describes one lattice in that frame: how much
//! consecutive tiles of a row overlap, how odd rows are shifted and how much
//! rows overlap each other, and which tilt every tile takes.

use serde::{Deserialize, Serialize};

use imagemapper_core::Size;

use super::Alignment;
use crate::model::{Shape, ShapeKind, Tilt, EQUILATERAL_RATIO};

/// Direction of the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridAxis {
    /// Rows run along x.
    Horizontal,
    /// Rows run along y.
    Vertical,
}

impl GridAxis {
    /// Maps a canvas size into the frame, `u` first.
    pub fn to_frame(self, size: Size) -> (f64, f64) {
        match self {
            GridAxis::Horizontal => (size.width as f64, size.height as f64),
            GridAxis::Vertical => (size.height as f64, size.width as f64),
        }
    }

    /// Maps a frame position back to canvas `(x, y)`.
    pub fn to_canvas(self, u: f64, v: f64) -> (f64, f64) {
        match self {
            GridAxis::Horizontal => (u, v),
            GridAxis::Vertical => (v, u),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternProperties {
    pub axis: GridAxis,
    /// Tile extent along the row.
    pub row_extent: f64,
    /// Tile extent across the rows.
    pub column_extent: f64,
    /// Added to the row step; negative values interlock neighbours.
    pub row_overlap: f64,
    /// Shift of odd rows along `u`.
    pub column_offset: f64,
    /// Added to the column step.
    pub column_overlap: f64,
    pub tilt: Tilt,
    pub secondary_tilt: Tilt,
    pub alternate_in_row: bool,
    pub switch_tilt_on_new_row: bool,
    pub extra_tilts: Option<[Tilt; 2]>,
    /// Tiles are round; steps snap to whole pixels with rows kept clear
    /// of each other.
    pub curved: bool,
}

impl PatternProperties {
    /// Straight rows and columns of identical tiles.
    pub fn plain(axis: GridAxis, footprint: Size, tilt: Tilt) -> Self {
        let (row_extent, column_extent) = axis.to_frame(footprint);
        Self {
            axis,
            row_extent,
            column_extent,
            row_overlap: 0.0,
            column_offset: 0.0,
            column_overlap: 0.0,
            tilt,
            secondary_tilt: tilt,
            alternate_in_row: false,
            switch_tilt_on_new_row: false,
            extra_tilts: None,
            curved: false,
        }
    }

    /// Lattice of `pattern` for the given alignment.
    pub fn for_pattern(pattern: &Shape, alignment: Alignment) -> Self {
        let footprint = pattern.bounds().size();
        let tilt = pattern.tilt();
        let kind = pattern.kind();
        let alt_axis = match alignment {
            Alignment::AltVertical => GridAxis::Vertical,
            _ => GridAxis::Horizontal,
        };

        match kind {
            ShapeKind::IsoscelesTriangle | ShapeKind::EquilateralTriangle => {
                let axis = if tilt.is_vertical() {
                    GridAxis::Horizontal
                } else {
                    GridAxis::Vertical
                };
                let mut props = Self::plain(axis, footprint, tilt);
                props.secondary_tilt = tilt.opposite();
                match alignment {
                    Alignment::Standard => {
                        props.row_overlap = -props.row_extent / 2.0;
                        props.alternate_in_row = true;
                        props.switch_tilt_on_new_row = true;
                    }
                    Alignment::AltHorizontal => {
                        props.row_overlap = -props.row_extent / 2.0;
                        props.alternate_in_row = true;
                        props.column_offset = props.row_extent / 2.0;
                    }
                    Alignment::AltVertical => {
                        props.switch_tilt_on_new_row = true;
                    }
                }
                props
            }
            ShapeKind::RightTriangle => {
                let mut props = Self::plain(GridAxis::Horizontal, footprint, tilt);
                match alignment {
                    Alignment::Standard => {}
                    Alignment::AltHorizontal => {
                        props.row_overlap = -props.row_extent;
                        props.alternate_in_row = true;
                        props.secondary_tilt = tilt.opposite();
                    }
                    Alignment::AltVertical => {
                        props.row_overlap = -props.row_extent;
                        props.alternate_in_row = true;
                        props.secondary_tilt = tilt.opposite();
                        props.extra_tilts = Some([tilt.turned(1), tilt.turned(3)]);
                        props.switch_tilt_on_new_row = true;
                    }
                }
                props
            }
            ShapeKind::HexFromRectangle | ShapeKind::HexFromDiameter => {
                if alignment == Alignment::Standard {
                    return Self::plain(GridAxis::Horizontal, footprint, tilt);
                }
                let mut props = Self::plain(alt_axis, footprint, tilt);
                let points_along_x = kind == ShapeKind::HexFromDiameter || tilt.is_vertical();
                let points_along_u = points_along_x == (alt_axis == GridAxis::Horizontal);
                if points_along_u {
                    props.row_overlap = props.row_extent / 2.0;
                    props.column_offset = props.row_extent * 0.75;
                    props.column_overlap = -props.column_extent / 2.0;
                } else {
                    props.column_offset = props.row_extent / 2.0;
                    props.column_overlap = -props.column_extent / 4.0;
                }
                props
            }
            _ => {
                if alignment == Alignment::Standard {
                    return Self::plain(GridAxis::Horizontal, footprint, tilt);
                }
                let mut props = Self::plain(alt_axis, footprint, tilt);
                props.column_offset = props.row_extent / 2.0;
                props.curved = matches!(
                    kind,
                    ShapeKind::CircleFromCenter | ShapeKind::CircleFromDiameter | ShapeKind::Ellipse
                );
                props.column_overlap = match kind {
                    ShapeKind::CircleFromCenter
                    | ShapeKind::CircleFromDiameter
                    | ShapeKind::Ellipse => -(1.0 - EQUILATERAL_RATIO) * props.column_extent,
                    ShapeKind::Rhombus => -props.column_extent / 2.0,
                    _ => 0.0,
                };
                props
            }
        }
    }

    /// Consecutive tiles of a row share a position.
    pub fn is_full_overlap(&self) -> bool {
        (self.row_overlap + self.row_extent).abs() < 1e-9
    }

    /// Tilt of the `k`-th tile along row `row`.
    pub fn tilt_at(&self, k: i64, row: i64) -> Tilt {
        let odd_row = row.rem_euclid(2) == 1;
        if !self.alternate_in_row {
            return if self.switch_tilt_on_new_row && odd_row {
                self.secondary_tilt
            } else {
                self.tilt
            };
        }
        let mut cycle = vec![self.tilt, self.secondary_tilt];
        if let Some(extra) = self.extra_tilts {
            cycle.extend(extra);
        }
        let len = cycle.len() as i64;
        let shift = if self.switch_tilt_on_new_row && odd_row {
            len / 2
        } else {
            0
        };
        cycle[(k + shift).rem_euclid(len) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoxCoords, CircleCoords};

    #[test]
    fn test_triangle_rows_alternate_and_switch() {
        let tri = Shape::IsoscelesTriangle(BoxCoords::new(0, 0, 20, 10));
        let props = PatternProperties::for_pattern(&tri, Alignment::Standard);
        assert_eq!(props.row_overlap, -10.0);
        assert_eq!(props.tilt_at(0, 0), Tilt::Deg0);
        assert_eq!(props.tilt_at(1, 0), Tilt::Deg180);
        assert_eq!(props.tilt_at(0, 1), Tilt::Deg180);
        assert_eq!(props.tilt_at(0, -1), Tilt::Deg180);
    }

    #[test]
    fn test_sideways_triangle_uses_vertical_rows() {
        let tri = Shape::EquilateralTriangle(BoxCoords::new(0, 0, 87, 100).with_tilt(Tilt::Deg90));
        let props = PatternProperties::for_pattern(&tri, Alignment::AltVertical);
        assert_eq!(props.axis, GridAxis::Vertical);
        assert_eq!(props.row_extent, 100.0);
        assert_eq!(props.tilt_at(3, 0), Tilt::Deg90);
        assert_eq!(props.tilt_at(3, 1), Tilt::Deg270);
    }

    #[test]
    fn test_right_triangle_four_way_cycle() {
        let tri = Shape::RightTriangle(BoxCoords::new(0, 0, 10, 10));
        let props = PatternProperties::for_pattern(&tri, Alignment::AltVertical);
        assert!(props.is_full_overlap());
        let row0: Vec<Tilt> = (0..4).map(|k| props.tilt_at(k, 0)).collect();
        assert_eq!(row0, vec![Tilt::Deg0, Tilt::Deg180, Tilt::Deg90, Tilt::Deg270]);
        assert_eq!(props.tilt_at(0, 1), Tilt::Deg90);
    }

    #[test]
    fn test_hex_packing_depends_on_point_direction() {
        let hex = Shape::HexFromDiameter(CircleCoords::new(50, 50, 20));
        let along = PatternProperties::for_pattern(&hex, Alignment::AltHorizontal);
        assert_eq!(along.row_overlap, 20.0);
        assert_eq!(along.column_offset, 30.0);
        let across = PatternProperties::for_pattern(&hex, Alignment::AltVertical);
        assert_eq!(across.row_overlap, 0.0);
        assert_eq!(across.column_overlap, -10.0);
    }

    #[test]
    fn test_circle_alt_rows_pack_hexagonally() {
        let circle = Shape::CircleFromCenter(CircleCoords::new(10, 10, 10));
        let props = PatternProperties::for_pattern(&circle, Alignment::AltHorizontal);
        let row_step = props.column_extent + props.column_overlap;
        assert!((row_step - 20.0 * EQUILATERAL_RATIO).abs() < 1e-9);
    }
}
