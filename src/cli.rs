//! Command-line front end.
//!
//! Every command works on design files and uses the configuration file for
//! its defaults.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use imagemapper_core::{Point, Size};
use imagemapper_designer::{
    export_map, import_map, Alignment, AreaProperties, Canvas, DesignFile, DrawOutcome,
    DrawSession, GridOrder, GridParameters, LoadedDesign, ScopeMode, ShapeKind,
};
use imagemapper_settings::Config;

/// ImageMapper - build HTML image maps from shape designs
#[derive(Parser, Debug)]
#[command(name = "imagemapper")]
#[command(about = "Design HTML image maps with shapes and grids", version)]
pub struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Attributes written on the exported `<area>`
#[derive(Args, Debug, Default)]
pub struct PropertyArgs {
    #[arg(long, default_value = "")]
    pub href: String,
    #[arg(long, default_value = "")]
    pub alt: String,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub id: String,
}

impl From<PropertyArgs> for AreaProperties {
    fn from(args: PropertyArgs) -> Self {
        AreaProperties::new(args.href, args.alt, args.title, args.id)
    }
}

fn parse_kind(s: &str) -> std::result::Result<ShapeKind, String> {
    ShapeKind::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
        format!("unknown shape kind '{}', expected one of: {}", s, names.join(", "))
    })
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", v, e))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the HTML <map> element of a design
    Export {
        /// Design file to export
        design: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the map name from the configuration
        #[arg(long)]
        map_name: Option<String>,
        /// Write attributes whose value is empty
        #[arg(long)]
        include_empty: bool,
    },

    /// Create a design from the <area> tags of an HTML file
    Import {
        /// HTML file to read
        html: PathBuf,
        /// Design file to write
        #[arg(short, long)]
        output: PathBuf,
        /// Canvas width (default: configuration, grown to fit the areas)
        #[arg(long)]
        width: Option<i32>,
        /// Canvas height (default: configuration, grown to fit the areas)
        #[arg(long)]
        height: Option<i32>,
    },

    /// Add a shape by replaying cursor releases
    ///
    /// The first point is the press. Box and circle kinds finish on the
    /// second point; polygons take one vertex per point and close when a
    /// point lands near the first vertex.
    Draw {
        /// Design file to extend
        design: PathBuf,
        /// Shape kind, e.g. rectangle, circle, hex, polygon
        #[arg(short, long, value_parser = parse_kind)]
        kind: ShapeKind,
        /// Cursor positions as x,y
        #[arg(short, long = "point", value_parser = parse_point, required = true)]
        points: Vec<Point>,
        #[command(flatten)]
        properties: PropertyArgs,
        /// Output file (default: overwrite the design)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Bond a pattern record to a scope record as a grid
    Grid {
        /// Design file holding both shapes
        design: PathBuf,
        /// Index of the scope record
        #[arg(long)]
        scope: usize,
        /// Index of the pattern record
        #[arg(long)]
        pattern: usize,
        /// inner or outer (default: configuration)
        #[arg(long)]
        scope_mode: Option<ScopeMode>,
        /// standard, alt-horizontal or alt-vertical (default: configuration)
        #[arg(long)]
        alignment: Option<Alignment>,
        /// Gap between tiles in pixels (default: configuration)
        #[arg(long)]
        spacing: Option<u32>,
        /// Tile numbering order, e.g. top-left (default: configuration)
        #[arg(long)]
        order: Option<GridOrder>,
        /// Output file (default: overwrite the design)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Turn the tiles of a grid into independent shapes
    Freeze {
        /// Design file holding the grid
        design: PathBuf,
        /// Index of the grid record in the design file
        #[arg(short, long)]
        grid: usize,
        /// Output file (default: overwrite the design)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the grids of a design with their tile counts
    Tiles {
        /// Design file to inspect
        design: PathBuf,
    },
}

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Export {
            design,
            output,
            map_name,
            include_empty,
        } => export(&config, &design, output.as_deref(), map_name, include_empty),
        Commands::Import {
            html,
            output,
            width,
            height,
        } => import(&config, &html, &output, width, height),
        Commands::Draw {
            design,
            kind,
            points,
            properties,
            output,
        } => draw(&config, &design, kind, &points, properties.into(), output.as_deref()),
        Commands::Grid {
            design,
            scope,
            pattern,
            scope_mode,
            alignment,
            spacing,
            order,
            output,
        } => {
            let defaults = config.designer.grid;
            let params = GridParameters {
                scope_mode: scope_mode.unwrap_or(defaults.scope_mode),
                alignment: alignment.unwrap_or(defaults.alignment),
                spacing: spacing.unwrap_or(defaults.spacing),
                order: order.unwrap_or(defaults.order),
            };
            grid(&design, scope, pattern, params, output.as_deref())
        }
        Commands::Freeze {
            design,
            grid,
            output,
        } => freeze(&design, grid, output.as_deref()),
        Commands::Tiles { design } => tiles(&design),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            Err(e) => {
                warn!("Using default configuration: {}", e);
                Ok(Config::default())
            }
        },
    }
}

fn load_design(path: &Path) -> Result<(DesignFile, LoadedDesign)> {
    let design = DesignFile::load_from_file(path)
        .with_context(|| format!("Failed to open design {}", path.display()))?;
    let loaded = design.to_canvas();
    for error in &loaded.skipped {
        warn!("{}", error);
    }
    for (record, rejection) in &loaded.failed_grids {
        warn!("Grid record {} has no tiles: {}", record, rejection);
    }
    Ok((design, loaded))
}

fn export(
    config: &Config,
    design: &Path,
    output: Option<&Path>,
    map_name: Option<String>,
    include_empty: bool,
) -> Result<()> {
    let (_, loaded) = load_design(design)?;
    let mut options = config.export_options();
    if let Some(name) = map_name {
        options.map_name = name;
    }
    options.include_empty_attributes |= include_empty;

    let html = export_map(&loaded.canvas, &options);
    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {} to {}", design.display(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn import(
    config: &Config,
    html: &Path,
    output: &Path,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<()> {
    let content =
        std::fs::read_to_string(html).with_context(|| format!("Failed to read {}", html.display()))?;
    let imported = import_map(&content);
    for (index, error) in &imported.skipped {
        warn!("Skipped <area> #{}: {}", index, error);
    }

    let defaults = config.canvas_size();
    let (fit_width, fit_height) = imported
        .areas
        .iter()
        .map(|(shape, _)| shape.bounds())
        .fold((0, 0), |(w, h), b| (w.max(b.max_x), h.max(b.max_y)));
    let size = Size::new(
        width.unwrap_or(defaults.width.max(fit_width)),
        height.unwrap_or(defaults.height.max(fit_height)),
    );

    let mut canvas = Canvas::new(size);
    for (shape, properties) in imported.areas {
        if let Err(e) = canvas.add_shape_with_properties(shape, properties) {
            warn!("Skipped area outside a {}x{} canvas: {}", size.width, size.height, e);
        }
    }

    let name = imported.name.unwrap_or_else(|| config.export.map_name.clone());
    DesignFile::from_canvas(name, &canvas)
        .save_to_file(output)
        .with_context(|| format!("Failed to save design {}", output.display()))?;
    info!("Imported {} areas into {}", canvas.shape_count(), output.display());
    Ok(())
}

/// Writes `canvas` back with the metadata of `design`.
fn save_design(design: DesignFile, canvas: &Canvas, path: &Path) -> Result<()> {
    let mut updated = DesignFile::from_canvas(design.metadata.name.clone(), canvas);
    updated.metadata.created = design.metadata.created;
    updated.metadata.author = design.metadata.author;
    updated.metadata.description = design.metadata.description;
    updated.metadata.image = design.metadata.image;
    updated
        .save_to_file(path)
        .with_context(|| format!("Failed to save design {}", path.display()))
}

fn record_id(canvas: &Canvas, index: usize) -> Result<u64> {
    match canvas.shapes().nth(index) {
        Some(obj) => Ok(obj.id),
        None => bail!("Design has no record {}", index),
    }
}

fn draw(
    config: &Config,
    design_path: &Path,
    kind: ShapeKind,
    points: &[Point],
    properties: AreaProperties,
    output: Option<&Path>,
) -> Result<()> {
    let (design, mut loaded) = load_design(design_path)?;
    let Some((&first, rest)) = points.split_first() else {
        bail!("No points given");
    };
    let mut session = DrawSession::start(kind, first)
        .on_canvas(loaded.canvas.size())
        .with_close_distance(config.designer.polygon_close_distance);

    let mut shape = None;
    for &point in rest {
        match session.end(point) {
            DrawOutcome::Done(done) => {
                shape = Some(done);
                break;
            }
            DrawOutcome::Continue => {}
            DrawOutcome::Error(rejection) => bail!("Cannot draw {} at {}: {}", kind, point, rejection),
        }
    }
    let Some(shape) = shape else {
        bail!(
            "{} is not finished after {} points",
            kind,
            session.vertices().len()
        );
    };

    loaded
        .canvas
        .add_shape_with_properties(shape, properties)
        .with_context(|| format!("Failed to add {}", kind))?;
    save_design(design, &loaded.canvas, output.unwrap_or(design_path))?;
    info!("Added {} as record {}", kind, loaded.canvas.shape_count() - 1);
    Ok(())
}

fn grid(
    design_path: &Path,
    scope: usize,
    pattern: usize,
    params: GridParameters,
    output: Option<&Path>,
) -> Result<()> {
    let (design, mut loaded) = load_design(design_path)?;
    let scope_id = record_id(&loaded.canvas, scope)?;
    let pattern_id = record_id(&loaded.canvas, pattern)?;
    loaded
        .canvas
        .create_grid(scope_id, pattern_id, params)
        .with_context(|| format!("Failed to bond record {} to record {}", pattern, scope))?;

    let tiles = loaded.canvas.grid_tiles(scope_id).map_or(0, |t| t.len());
    save_design(design, &loaded.canvas, output.unwrap_or(design_path))?;
    info!("Record {} is a grid of {} tiles", scope, tiles);
    Ok(())
}

fn freeze(design_path: &Path, grid: usize, output: Option<&Path>) -> Result<()> {
    let (design, mut loaded) = load_design(design_path)?;
    let id = record_id(&loaded.canvas, grid)?;
    let created = loaded
        .canvas
        .freeze_grid(id)
        .with_context(|| format!("Failed to freeze record {}", grid))?;

    save_design(design, &loaded.canvas, output.unwrap_or(design_path))?;
    info!("Froze record {} into {} new shapes", grid, created.len());
    Ok(())
}

fn tiles(design: &Path) -> Result<()> {
    let (_, loaded) = load_design(design)?;
    let canvas = &loaded.canvas;
    let mut grids = 0;
    for (index, obj) in canvas.shapes().enumerate() {
        let Some(grid) = &obj.grid else {
            continue;
        };
        grids += 1;
        println!(
            "record {}: {} over {} -> {} tiles ({}, {}, spacing {}, {})",
            index,
            canvas
                .get_shape(grid.pattern)
                .map(|p| p.shape.kind().name())
                .unwrap_or("?"),
            obj.shape.kind(),
            grid.tiles.len(),
            grid.params.scope_mode,
            grid.params.alignment,
            grid.params.spacing,
            grid.params.order,
        );
    }
    if grids == 0 {
        println!("No grids in {}", design.display());
    }
    Ok(())
}
