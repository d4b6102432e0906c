//! # ImageMapper Core
//!
//! Core types shared by the ImageMapper crates.
//! Provides the integer pixel geometry primitives and the error
//! hierarchy used by the designer, settings and binary crates.

pub mod error;
pub mod geometry;

pub use error::{GridError, RecordError};
pub use geometry::{Bounds, Point, PointF, Size};
