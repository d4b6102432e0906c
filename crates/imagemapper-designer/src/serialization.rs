//! Serialization and deserialization for design files.
//!
//! Implements save/load for `.imap` design files: JSON documents holding
//! the canvas size, one record per shape in draw order, and the grid bonds
//! as indices into the record list.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use imagemapper_core::{Point, RecordError, Size};

use crate::canvas::Canvas;
use crate::edit::Rejection;
use crate::grid::{Alignment, GridOrder, GridParameters, ScopeMode};
use crate::model::{BoxCoords, CircleCoords, Shape, ShapeKind, Tilt};
use crate::properties::AreaProperties;

/// Design file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub version: String,
    pub metadata: DesignMetadata,
    pub canvas: Size,
    #[serde(default)]
    pub areas: Vec<AreaRecord>,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Image the map is drawn over.
    #[serde(default)]
    pub image: Option<String>,
}

/// Serialized shape.
///
/// `coords` is `[x, y, width, height]` for box kinds, `[x, y, r]` for
/// circle kinds and the flattened vertex list for polygons. A grid lists
/// its pattern's index first in `bonds`; a pattern lists its grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub coords: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<i32>,
    #[serde(default)]
    pub properties: AreaProperties,
    #[serde(default)]
    pub is_grid: bool,
    #[serde(default)]
    pub bonds: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_scope: Option<ScopeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_align: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_space: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_order: Option<GridOrder>,
}

impl AreaRecord {
    /// Record for a plain shape.
    pub fn from_shape(shape: &Shape, properties: &AreaProperties) -> Self {
        let (coords, tilt) = match shape {
            Shape::Polygon(points) => (points.iter().flat_map(|p| [p.x, p.y]).collect(), None),
            _ => match (shape.box_coords(), shape.circle_coords()) {
                (Some(c), _) => (
                    vec![c.x, c.y, c.width, c.height],
                    shape.kind().uses_tilt().then(|| i32::from(c.tilt.degrees())),
                ),
                (None, Some(c)) => (vec![c.x, c.y, c.r], None),
                (None, None) => (Vec::new(), None),
            },
        };
        Self {
            shape_type: shape.kind().name().to_string(),
            coords,
            tilt,
            properties: properties.clone(),
            is_grid: false,
            bonds: Vec::new(),
            draw_scope: None,
            draw_align: None,
            grid_space: None,
            grid_order: None,
        }
    }

    /// Grid parameters stored on the record, defaults for missing fields.
    pub fn grid_parameters(&self) -> GridParameters {
        let defaults = GridParameters::default();
        GridParameters {
            scope_mode: self.draw_scope.unwrap_or(defaults.scope_mode),
            alignment: self.draw_align.unwrap_or(defaults.alignment),
            spacing: self.grid_space.unwrap_or(defaults.spacing),
            order: self.grid_order.unwrap_or(defaults.order),
        }
    }

    /// Decodes the shape of record number `record`.
    pub fn to_shape(&self, record: usize) -> std::result::Result<Shape, RecordError> {
        let kind = ShapeKind::from_name(&self.shape_type).ok_or_else(|| RecordError::UnknownShapeType {
            record,
            shape_type: self.shape_type.clone(),
        })?;
        let invalid = |reason: &str| RecordError::InvalidCoords {
            record,
            shape_type: self.shape_type.clone(),
            reason: reason.to_string(),
        };
        let tilt = match self.tilt {
            Some(degrees) => Tilt::from_degrees(degrees)
                .ok_or_else(|| invalid("tilt must be a multiple of 90 degrees"))?,
            None => Tilt::default(),
        };

        let shape = match (kind, self.coords.as_slice()) {
            (ShapeKind::Polygon, coords) => {
                if coords.len() < 6 || coords.len() % 2 != 0 {
                    return Err(invalid("a polygon needs at least 3 coordinate pairs"));
                }
                Shape::Polygon(coords.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect())
            }
            (kind, &[x, y, w, h]) if kind.is_box() => {
                Shape::from_box(kind, BoxCoords::new(x, y, w, h).with_tilt(tilt))
                    .ok_or_else(|| invalid("not a box shape"))?
            }
            (kind, &[x, y, r]) if !kind.is_box() => Shape::from_circle(kind, CircleCoords::new(x, y, r))
                .ok_or_else(|| invalid("not a circle shape"))?,
            (kind, coords) => {
                let expected = if kind.is_box() { 4 } else { 3 };
                return Err(invalid(&format!("expected {} values, found {}", expected, coords.len())));
            }
        };
        if !shape.is_valid() {
            return Err(invalid("degenerate geometry"));
        }
        Ok(shape)
    }
}

/// Canvas rebuilt from a design file together with what had to be dropped.
#[derive(Debug)]
pub struct LoadedDesign {
    pub canvas: Canvas,
    /// Records skipped because they are corrupted.
    pub skipped: Vec<RecordError>,
    /// Grid records kept as plain shapes because their tiles could not be
    /// generated.
    pub failed_grids: Vec<(usize, Rejection)>,
}

impl DesignFile {
    /// Create a new empty design file
    pub fn new(name: impl Into<String>, canvas: Size) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
                image: None,
            },
            canvas,
            areas: Vec::new(),
        }
    }

    /// Snapshot of a canvas, shapes in draw order.
    pub fn from_canvas(name: impl Into<String>, canvas: &Canvas) -> Self {
        let mut design = Self::new(name, canvas.size());
        let index: BTreeMap<u64, usize> = canvas
            .shapes()
            .enumerate()
            .map(|(i, obj)| (obj.id, i))
            .collect();

        for obj in canvas.shapes() {
            let mut record = AreaRecord::from_shape(&obj.shape, &obj.properties);
            if let Some(grid) = &obj.grid {
                record.is_grid = true;
                record.bonds.extend(index.get(&grid.pattern).copied());
                record.draw_scope = Some(grid.params.scope_mode);
                record.draw_align = Some(grid.params.alignment);
                record.grid_space = Some(grid.params.spacing);
                record.grid_order = Some(grid.params.order);
            }
            record
                .bonds
                .extend(obj.bonded_grids.iter().filter_map(|id| index.get(id).copied()));
            design.areas.push(record);
        }
        design
    }

    /// Rebuilds the canvas.
    ///
    /// Shapes are added first so every pattern exists before the grids that
    /// use it are bonded. Corrupted records are skipped and reported; a
    /// grid whose pattern was skipped is skipped too.
    pub fn to_canvas(&self) -> LoadedDesign {
        let mut canvas = Canvas::new(self.canvas);
        let mut skipped = Vec::new();
        let mut failed_grids = Vec::new();
        let mut ids: Vec<Option<u64>> = Vec::with_capacity(self.areas.len());

        for (i, record) in self.areas.iter().enumerate() {
            let added = record.to_shape(i).and_then(|shape| {
                canvas
                    .add_shape_with_properties(shape, record.properties.clone())
                    .map_err(|e| RecordError::InvalidCoords {
                        record: i,
                        shape_type: record.shape_type.clone(),
                        reason: e.to_string(),
                    })
            });
            match added {
                Ok(id) => ids.push(Some(id)),
                Err(e) => {
                    warn!("Skipping design record: {}", e);
                    skipped.push(e);
                    ids.push(None);
                }
            }
        }

        for (i, record) in self.areas.iter().enumerate() {
            let Some(scope_id) = ids[i].filter(|_| record.is_grid) else {
                continue;
            };
            let pattern_id = match self.resolve_pattern(i, record, &ids) {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping design record: {}", e);
                    canvas.remove_shape(scope_id);
                    skipped.push(e);
                    continue;
                }
            };
            if let Err(e) = canvas.create_grid(scope_id, pattern_id, record.grid_parameters()) {
                warn!("Record {} kept as a plain shape: {}", i, e);
                failed_grids.push((i, e));
            }
        }

        debug!(
            "Loaded {} of {} design records",
            canvas.shape_count(),
            self.areas.len()
        );
        LoadedDesign {
            canvas,
            skipped,
            failed_grids,
        }
    }

    fn resolve_pattern(
        &self,
        record: usize,
        area: &AreaRecord,
        ids: &[Option<u64>],
    ) -> std::result::Result<u64, RecordError> {
        let index = *area
            .bonds
            .first()
            .ok_or(RecordError::GridWithoutPattern { record })?;
        let target = ids.get(index).ok_or(RecordError::BondOutOfRange {
            record,
            index,
            len: ids.len(),
        })?;
        target.ok_or(RecordError::MissingBondTarget { record, index })
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize design")?;

        std::fs::write(path.as_ref(), json).context("Failed to write design file")?;

        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read design file")?;

        let design: DesignFile =
            serde_json::from_str(&content).context("Failed to parse design file")?;

        Ok(design)
    }

    /// Marks the design as modified now.
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}
