//! # ImageMapper
//!
//! A Rust-based designer for HTML image maps:
//! - Twelve shape kinds, from rectangles to regular hexagons and polygons
//! - Constrained handle editing that never leaves the image
//! - Grids that tile a pattern shape across a scope shape
//! - HTML `<map>` export and import, JSON design files
//!
//! ## Architecture
//!
//! ImageMapper is organized as a workspace with multiple crates:
//!
//! 1. **imagemapper-core** - Pixel geometry and error types
//! 2. **imagemapper-designer** - Shapes, editing, grids, export and design files
//! 3. **imagemapper-settings** - Configuration files
//! 4. **imagemapper** - Command-line binary that integrates all crates

pub mod cli;

pub use imagemapper_designer as designer;
pub use imagemapper_settings as settings;

pub use imagemapper_core::{Bounds, GridError, Point, PointF, RecordError, Size};

pub use imagemapper_designer::{
    export_map, import_map, Canvas, DesignFile, DrawSession, ExportOptions, GridParameters,
    Rejection, Shape, ShapeKind,
};

pub use imagemapper_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout for exported maps
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
