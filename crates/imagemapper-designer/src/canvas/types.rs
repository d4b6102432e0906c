use std::collections::BTreeSet;

use crate::grid::{GridParameters, Tile};
use crate::model::Shape;
use crate::properties::AreaProperties;

/// Grid role of a scope shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Id of the pattern shape.
    pub pattern: u64,
    pub params: GridParameters,
    /// Derived tiles, replaced on every recompute.
    pub tiles: Vec<Tile>,
}

/// Drawing object on the canvas that can be selected and manipulated.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingObject {
    pub id: u64,
    pub name: String,
    pub shape: Shape,
    pub properties: AreaProperties,
    pub selected: bool,
    /// Present when this shape is the scope of a grid.
    pub grid: Option<Grid>,
    /// Grids using this shape as their pattern.
    pub bonded_grids: BTreeSet<u64>,
}

impl DrawingObject {
    pub fn new(id: u64, shape: Shape) -> Self {
        Self {
            id,
            name: format!("{} {}", shape.kind(), id),
            shape,
            properties: AreaProperties::default(),
            selected: false,
            grid: None,
            bonded_grids: BTreeSet::new(),
        }
    }

    pub fn with_properties(mut self, properties: AreaProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn is_grid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn is_pattern(&self) -> bool {
        !self.bonded_grids.is_empty()
    }

    pub fn pattern_id(&self) -> Option<u64> {
        self.grid.as_ref().map(|g| g.pattern)
    }
}
