//! Tile reordering.
//!
//! Tiles are keyed on their bounding-box center. Sorted primary values that
//! lie within [`BAND_TOLERANCE`] of their neighbour chain into one band, so
//! tiles that are only nudged by rounding or by an interlocking stagger
//! still read as one row or column.

use std::cmp::Ordering;

use super::{GridOrder, Tile};

/// Primary coordinates closer than this share a band, in pixels.
pub const BAND_TOLERANCE: f64 = 2.0;

struct Keyed {
    primary: f64,
    secondary: f64,
    band: usize,
    index: usize,
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sort keys for `order`: `(primary, secondary)` with descending axes
/// negated.
fn keys(order: GridOrder, x: f64, y: f64) -> (f64, f64) {
    match order {
        GridOrder::TopLeft => (y, x),
        GridOrder::TopRight => (y, -x),
        GridOrder::BottomLeft => (-y, x),
        GridOrder::BottomRight => (-y, -x),
        GridOrder::LeftTop => (x, y),
        GridOrder::LeftBottom => (x, -y),
        GridOrder::RightTop => (-x, y),
        GridOrder::RightBottom => (-x, -y),
    }
}

pub fn order_tiles(tiles: Vec<Tile>, order: GridOrder) -> Vec<Tile> {
    let mut keyed: Vec<Keyed> = tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let center = tile.shape.bounds().center();
            let (primary, secondary) = keys(order, center.x, center.y);
            Keyed {
                primary,
                secondary,
                band: 0,
                index,
            }
        })
        .collect();

    keyed.sort_by(|a, b| compare(a.primary, b.primary).then(a.index.cmp(&b.index)));
    let mut band = 0;
    for i in 1..keyed.len() {
        if keyed[i].primary - keyed[i - 1].primary >= BAND_TOLERANCE {
            band += 1;
        }
        keyed[i].band = band;
    }
    keyed.sort_by(|a, b| {
        a.band
            .cmp(&b.band)
            .then(compare(a.secondary, b.secondary))
            .then(compare(a.primary, b.primary))
            .then(a.index.cmp(&b.index))
    });

    let mut slots: Vec<Option<Tile>> = tiles.into_iter().map(Some).collect();
    keyed
        .iter()
        .filter_map(|k| slots.get_mut(k.index).and_then(Option::take))
        .collect()
}
