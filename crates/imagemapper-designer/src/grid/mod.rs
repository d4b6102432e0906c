//! Grid tiling engine.
//!
//! A grid replicates a pattern shape across the extent of a scope shape.
//! Recomputing a grid is stateless:
//!
//! 1. derive the pattern's lattice ([`PatternProperties`]),
//! 2. enumerate lattice positions around the scope's bounding box,
//! 3. filter candidates against the scope outline for non-rectangular
//!    scopes,
//! 4. reorder the survivors ([`GridOrder`]).
//!
//! The same inputs always produce the same tiles in the same order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use imagemapper_core::{GridError, Size};

use crate::model::Shape;
use crate::predicates::{contained, intersects, Region};

mod freeze;
mod lattice;
mod order;
mod pattern;

pub use freeze::{freeze_plan, FreezePlan};
pub use lattice::{enumerate, Steps};
pub use order::{order_tiles, BAND_TOLERANCE};
pub use pattern::{GridAxis, PatternProperties};

/// Upper bound on the tiles a single recompute may produce.
pub const MAX_TILES: usize = 100_000;

/// Which tiles a grid keeps relative to its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// Tiles entirely inside the scope.
    #[default]
    Inner,
    /// Tiles touching the scope with positive area.
    Outer,
}

/// Which axis receives the interlocking stagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Standard,
    AltHorizontal,
    AltVertical,
}

/// Tile numbering order: primary direction first, then the direction
/// inside a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridOrder {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

macro_rules! named_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(format!(
                        "unknown {} '{}', expected one of: {}",
                        stringify!($ty),
                        other,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }
    };
}

named_enum!(ScopeMode {
    Inner => "inner",
    Outer => "outer",
});

named_enum!(Alignment {
    Standard => "standard",
    AltHorizontal => "alt-horizontal",
    AltVertical => "alt-vertical",
});

named_enum!(GridOrder {
    TopLeft => "top-left",
    TopRight => "top-right",
    BottomLeft => "bottom-left",
    BottomRight => "bottom-right",
    LeftTop => "left-top",
    LeftBottom => "left-bottom",
    RightTop => "right-top",
    RightBottom => "right-bottom",
});

/// User-facing grid settings. Changing any field recomputes the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridParameters {
    #[serde(default)]
    pub scope_mode: ScopeMode,
    #[serde(default)]
    pub alignment: Alignment,
    /// Gap between neighbouring tiles, in pixels.
    #[serde(default)]
    pub spacing: u32,
    #[serde(default)]
    pub order: GridOrder,
}

/// One generated tile. Tiles are derived data and never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub shape: Shape,
    /// Lattice row index.
    pub row: i64,
    /// Position along the row; both tiles of a full-overlap cell count.
    pub position: i64,
}

/// Tiles of `pattern` over `scope`.
pub fn generate_tiles(
    pattern: &Shape,
    scope: &Shape,
    params: &GridParameters,
    canvas: Size,
) -> Result<Vec<Tile>, GridError> {
    let props = PatternProperties::for_pattern(pattern, params.alignment);
    generate_tiles_with(pattern, &props, scope, params, canvas)
}

/// Same as [`generate_tiles`] with explicit lattice properties.
pub fn generate_tiles_with(
    pattern: &Shape,
    props: &PatternProperties,
    scope: &Shape,
    params: &GridParameters,
    canvas: Size,
) -> Result<Vec<Tile>, GridError> {
    let candidates = enumerate(pattern, props, &scope.bounds(), params, canvas)?;
    let enumerated = candidates.len();

    let region = Region::from_shape(scope);
    let tiles: Vec<Tile> = if region.is_rectangular() {
        candidates
    } else {
        candidates
            .into_iter()
            .filter(|tile| {
                let outline = tile.shape.outline();
                match params.scope_mode {
                    ScopeMode::Inner => contained(&region, &outline),
                    ScopeMode::Outer => intersects(&region, &outline),
                }
            })
            .collect()
    };

    debug!(
        "Grid of {} over {}: {} candidates, {} kept ({}, {}, spacing {})",
        pattern.kind(),
        scope.kind(),
        enumerated,
        tiles.len(),
        params.scope_mode,
        params.alignment,
        params.spacing
    );
    Ok(order_tiles(tiles, params.order))
}
