//! Lattice enumeration.
//!
//! Rows are phase-locked to the pattern's bounding-box origin, so moving
//! the scope never shifts the lattice. Candidate index ranges are computed
//! with a one-step margin and every tile is then checked on its rounded
//! bounding box.

use tracing::debug;

use imagemapper_core::{Bounds, GridError, Size};

use super::pattern::{GridAxis, PatternProperties};
use super::{GridParameters, ScopeMode, Tile, MAX_TILES};
use crate::model::Shape;

const FULL_OVERLAP_TILES: usize = 2;

/// Steps of the lattice once spacing has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    /// Distance between row positions; a full-overlap cell counts once.
    pub along: f64,
    /// Distance between rows.
    pub across: f64,
    /// Shift of odd rows.
    pub offset: f64,
}

impl Steps {
    pub fn new(props: &PatternProperties, spacing: u32) -> Self {
        let s = spacing as f64;
        let wu = props.row_extent;
        let hv = props.column_extent;
        let scale_u = (wu + s) / wu;
        let along = if props.is_full_overlap() {
            wu + s
        } else {
            (wu + props.row_overlap) * scale_u
        };
        let across = (hv + props.column_overlap) * (hv + s) / hv;
        let offset = props.column_offset * scale_u;
        if props.curved {
            return Self::snapped(along, across, offset, wu, hv);
        }
        Self {
            along,
            across,
            offset,
        }
    }

    /// Whole-pixel steps for round tiles. Positions are then exact, and the
    /// row distance is raised until staggered neighbours no longer overlap:
    /// scaled onto unit circles, neighbour centers must be at least one
    /// diameter apart.
    fn snapped(along: f64, across: f64, offset: f64, wu: f64, hv: f64) -> Self {
        let along = along.ceil();
        let offset = offset.floor().min(along);
        let dx = offset.min(along - offset) / wu;
        let clear = hv * (1.0 - dx * dx).max(0.0).sqrt();
        Self {
            along,
            across: across.ceil().max(clear.ceil()),
            offset,
        }
    }
}

fn check_pattern(pattern: &Shape, props: &PatternProperties) -> Result<(), GridError> {
    let size = pattern.bounds().size();
    if props.row_extent <= 0.0 || props.column_extent <= 0.0 {
        return Err(GridError::DegeneratePattern {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

/// First and last lattice index whose tile may meet `[lo, hi]`.
fn index_range(lo: f64, hi: f64, start: f64, extent: f64, step: f64, mode: ScopeMode) -> (i64, i64) {
    let (first, last) = match mode {
        ScopeMode::Inner => ((lo - start) / step, (hi - extent - start) / step),
        ScopeMode::Outer => ((lo - extent - start) / step, (hi - start) / step),
    };
    (first.ceil() as i64 - 1, last.floor() as i64 + 1)
}

fn keep(tile: &Bounds, scope: &Bounds, mode: ScopeMode, canvas: Size) -> bool {
    match mode {
        ScopeMode::Inner => scope.contains_bounds(tile),
        ScopeMode::Outer => {
            scope.overlaps(tile)
                && tile.min_x >= 0
                && tile.min_y >= 0
                && tile.max_x <= canvas.width
                && tile.max_y <= canvas.height
        }
    }
}

/// Every tile of the lattice whose bounding box passes the scope-mode
/// test, rows ascending then positions ascending.
pub fn enumerate(
    pattern: &Shape,
    props: &PatternProperties,
    scope: &Bounds,
    params: &GridParameters,
    canvas: Size,
) -> Result<Vec<Tile>, GridError> {
    check_pattern(pattern, props)?;
    let mode = params.scope_mode;
    let full_overlap = props.is_full_overlap();
    if full_overlap && props.column_overlap != 0.0 {
        return Err(GridError::UnsupportedConfiguration {
            kind: pattern.kind().to_string(),
            alignment: params.alignment.to_string(),
            column_overlap: props.column_overlap,
        });
    }

    let steps = Steps::new(props, params.spacing);
    let size = pattern.bounds().size();
    if steps.along <= 0.0 || steps.across <= 0.0 {
        return Err(GridError::DegeneratePattern {
            width: size.width,
            height: size.height,
        });
    }

    let origin = pattern.bounds();
    let (pu, pv) = match props.axis {
        GridAxis::Horizontal => (origin.min_x as f64, origin.min_y as f64),
        GridAxis::Vertical => (origin.min_y as f64, origin.min_x as f64),
    };
    let (su0, sv0, su1, sv1) = match props.axis {
        GridAxis::Horizontal => (scope.min_x, scope.min_y, scope.max_x, scope.max_y),
        GridAxis::Vertical => (scope.min_y, scope.min_x, scope.max_y, scope.max_x),
    };
    let (su0, sv0, su1, sv1) = (su0 as f64, sv0 as f64, su1 as f64, sv1 as f64);

    let (row_first, row_last) =
        index_range(sv0, sv1, pv, props.column_extent, steps.across, mode);
    let per_cell = if full_overlap { FULL_OVERLAP_TILES } else { 1 };
    let estimate = ((row_last - row_first + 1).max(0) as f64)
        * (((su1 - su0) / steps.along).ceil() + 3.0).max(0.0)
        * per_cell as f64;
    if estimate > MAX_TILES as f64 {
        return Err(GridError::TooManyTiles { limit: MAX_TILES });
    }

    let mut tiles = Vec::new();
    for row in row_first..=row_last {
        let v = pv + row as f64 * steps.across;
        let shift = if row.rem_euclid(2) == 1 { steps.offset } else { 0.0 };
        let (first, last) =
            index_range(su0, su1, pu + shift, props.row_extent, steps.along, mode);
        for cell in first..=last {
            let u = pu + shift + cell as f64 * steps.along;
            let (x, y) = props.axis.to_canvas(u, v);
            let placed = pattern.with_origin(x.round() as i32, y.round() as i32);
            for part in 0..per_cell as i64 {
                let k = cell * per_cell as i64 + part;
                let shape = placed.with_tilt(props.tilt_at(k, row));
                if keep(&shape.bounds(), scope, mode, canvas) {
                    tiles.push(Tile { shape, row, position: k });
                }
            }
        }
    }
    debug!(
        "Enumerated {} tiles for {} ({:?} rows, step {:.2} x {:.2})",
        tiles.len(),
        pattern.kind(),
        props.axis,
        steps.along,
        steps.across
    );
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Alignment;
    use crate::model::{BoxCoords, CircleCoords};

    fn inner() -> GridParameters {
        GridParameters::default()
    }

    #[test]
    fn test_plain_steps_add_spacing() {
        let rect = Shape::Rectangle(BoxCoords::new(0, 0, 10, 20));
        let props = PatternProperties::for_pattern(&rect, Alignment::Standard);
        let steps = Steps::new(&props, 5);
        assert_eq!(steps.along, 15.0);
        assert_eq!(steps.across, 25.0);
    }

    #[test]
    fn test_interlocked_steps_scale_uniformly() {
        let tri = Shape::IsoscelesTriangle(BoxCoords::new(0, 0, 20, 10));
        let props = PatternProperties::for_pattern(&tri, Alignment::Standard);
        let steps = Steps::new(&props, 20);
        assert_eq!(steps.along, 20.0);
    }

    #[test]
    fn test_round_tiles_snap_to_whole_pixels() {
        let circle = Shape::CircleFromCenter(CircleCoords::new(50, 50, 5));
        let props = PatternProperties::for_pattern(&circle, Alignment::AltHorizontal);
        let steps = Steps::new(&props, 0);
        assert_eq!(steps.along, 10.0);
        assert_eq!(steps.offset, 5.0);
        // 10 * sqrt(3) / 2 = 8.66
        assert_eq!(steps.across, 9.0);

        let ellipse = Shape::Ellipse(BoxCoords::new(0, 0, 11, 7));
        let props = PatternProperties::for_pattern(&ellipse, Alignment::AltHorizontal);
        let steps = Steps::new(&props, 0);
        assert_eq!(steps.offset, 5.0);
        // 7 * sqrt(1 - (5/11)^2) = 6.24
        assert_eq!(steps.across, 7.0);
    }

    #[test]
    fn test_phase_locked_to_pattern() {
        let rect = Shape::Rectangle(BoxCoords::new(3, 0, 10, 10));
        let props = PatternProperties::for_pattern(&rect, Alignment::Standard);
        let scope = Bounds::new(0, 0, 40, 10);
        let tiles =
            enumerate(&rect, &props, &scope, &inner(), Size::new(100, 100)).unwrap();
        let xs: Vec<i32> = tiles.iter().map(|t| t.shape.bounds().min_x).collect();
        assert_eq!(xs, vec![3, 13, 23]);
    }

    #[test]
    fn test_huge_lattice_is_refused() {
        let rect = Shape::Rectangle(BoxCoords::new(0, 0, 1, 1));
        let props = PatternProperties::for_pattern(&rect, Alignment::Standard);
        let scope = Bounds::new(0, 0, 10_000, 10_000);
        let result = enumerate(&rect, &props, &scope, &inner(), Size::new(10_000, 10_000));
        assert!(matches!(result, Err(GridError::TooManyTiles { .. })));
    }
}
