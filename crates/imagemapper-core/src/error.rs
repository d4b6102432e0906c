//! Error handling for ImageMapper
//!
//! Provides the error types shared by the designer and the binary:
//! - Grid errors (tiling configurations the formulas cannot resolve)
//! - Record errors (corrupted design file entries)
//!
//! File and command failures are reported with `anyhow` context by the
//! callers.
//!
//! Expected interactive outcomes (an edit that would leave the canvas, a
//! degenerate shape) are not errors; the designer reports those as
//! rejections.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Grid tiling error type
///
/// Raised by a grid recompute. A recompute that fails leaves the previous
/// tile set untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Full-overlap tiling combined with a column overlap
    #[error(
        "Unsupported grid configuration for {kind} with {alignment} alignment: \
         full-overlap rows cannot be combined with column overlap {column_overlap}"
    )]
    UnsupportedConfiguration {
        /// The pattern shape kind.
        kind: String,
        /// The grid alignment.
        alignment: String,
        /// The offending column overlap in pixels.
        column_overlap: f64,
    },

    /// The grid's pattern shape does not exist
    #[error("Pattern shape {id} not found")]
    PatternNotFound {
        /// The missing pattern id.
        id: u64,
    },

    /// The shape is not a grid
    #[error("Shape {id} is not a grid")]
    NotAGrid {
        /// The shape id.
        id: u64,
    },

    /// A shape cannot be bonded to itself
    #[error("Shape {id} cannot be its own pattern")]
    SelfBond {
        /// The shape id.
        id: u64,
    },

    /// The lattice would produce more tiles than allowed
    #[error("Grid would produce more than {limit} tiles")]
    TooManyTiles {
        /// The tile limit.
        limit: usize,
    },

    /// The pattern footprint is empty
    #[error("Pattern footprint {width}x{height} is degenerate")]
    DegeneratePattern {
        /// Footprint width.
        width: i32,
        /// Footprint height.
        height: i32,
    },
}

/// Design record error type
///
/// Fatal for the record it was raised on; loaders skip and report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Bond index outside the area list
    #[error("Record {record}: bond index {index} out of range (0..{len})")]
    BondOutOfRange {
        /// Index of the record holding the bond.
        record: usize,
        /// The bond index.
        index: usize,
        /// Number of records.
        len: usize,
    },

    /// Bond target was skipped or is not loadable
    #[error("Record {record}: bond target {index} is missing")]
    MissingBondTarget {
        /// Index of the record holding the bond.
        record: usize,
        /// The bond index.
        index: usize,
    },

    /// A grid record without a pattern bond
    #[error("Record {record}: grid has no pattern bond")]
    GridWithoutPattern {
        /// Index of the record.
        record: usize,
    },

    /// Coordinates do not match the shape type
    #[error("Record {record}: invalid coordinates for {shape_type}: {reason}")]
    InvalidCoords {
        /// Index of the record.
        record: usize,
        /// Declared shape type.
        shape_type: String,
        /// What is wrong with the coordinates.
        reason: String,
    },

    /// Shape type not recognised
    #[error("Record {record}: unknown shape type '{shape_type}'")]
    UnknownShapeType {
        /// Index of the record.
        record: usize,
        /// The unknown type name.
        shape_type: String,
    },
}
