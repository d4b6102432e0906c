//! # ImageMapper Designer
//!
//! This crate provides the editing engine behind an HTML image-map
//! designer: shapes drawn over an image, constrained handle edits, grid
//! tiling, and the files the designer reads and writes.
//!
//! ## Core Components
//!
//! ### Design Elements
//! - **Shapes**: Rectangles, squares, rhombi, ellipses, circles, three
//!   triangle kinds, two hexagon kinds and free polygons
//! - **Canvas**: Shape store, selection and grid bonds
//! - **Drawing Sessions**: Press / drag / release into a new shape
//!
//! ### Editing
//! - **Handles**: Per-kind control points with exact delta bounds
//! - **Move / Rotate**: Translation limits and quarter-turn rotation
//! - **Predicates**: Containment and intersection tests
//!
//! ### Grids
//! - **Tiling**: A pattern shape replicated across a scope shape
//! - **Ordering**: Eight numbering orders with row banding
//! - **Freeze**: Tiles turned into independent shapes
//!
//! ### Files
//! - **Export / Import**: HTML `<map>` elements
//! - **Serialization**: JSON design files
//!
//! ## Architecture
//!
//! ```text
//! Canvas (Shape store + selection)
//!   ├── Edit (handles, move, rotate)
//!   │     └── Predicates
//!   └── Grid (tiling, ordering, freeze)
//!
//! Areas (HTML export / import)
//! Serialization (design files)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use imagemapper_core::Size;
//! use imagemapper_designer::{BoxCoords, Canvas, GridParameters, Shape};
//!
//! let mut canvas = Canvas::new(Size::new(200, 200));
//! let scope = canvas.add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 100, 100))).unwrap();
//! let pattern = canvas.add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 50, 50))).unwrap();
//! canvas.create_grid(scope, pattern, GridParameters::default()).unwrap();
//! assert_eq!(canvas.grid_tiles(scope).map(|t| t.len()), Some(4));
//! ```

pub mod areas;
pub mod canvas;
pub mod draw;
pub mod edit;
pub mod grid;
pub mod model;
pub mod predicates;
pub mod properties;
pub mod selection_manager;
pub mod serialization;
pub mod shape_store;

pub use areas::{export_map, import_map, AreaError, ExportOptions, ImportedMap};
pub use canvas::{Canvas, DrawingObject, Grid};
pub use draw::{DrawOutcome, DrawSession, POLYGON_CLOSE_DISTANCE};
pub use edit::{
    apply_delta, drag_bounds, edit_shape, handle_position, handles, move_bounds, rotate, DeltaBounds,
    DragKind, DragSession, Handle, Rejection, RotateDirection,
};
pub use grid::{generate_tiles, Alignment, GridOrder, GridParameters, ScopeMode, Tile};
pub use model::{AreaType, BoxCoords, CircleCoords, Shape, ShapeKind, Tilt};
pub use properties::{AreaProperties, INDEX_TOKEN};
pub use serialization::{AreaRecord, DesignFile, LoadedDesign};
