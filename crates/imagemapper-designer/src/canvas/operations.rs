//! Commit operations.
//!
//! Every operation computes its candidate shapes and the tiles of every
//! grid they affect before writing anything, so a rejected operation leaves
//! the canvas exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use imagemapper_core::GridError;

use super::{Canvas, DrawingObject, Grid};
use crate::edit::{edit_shape, move_bounds_all, rotate, validate, Handle, Rejection, RotateDirection};
use crate::grid::{freeze_plan, generate_tiles, GridParameters, Tile};
use crate::model::Shape;

impl Canvas {
    /// Moves every selected shape by the same delta.
    pub fn move_selected(&mut self, dx: i32, dy: i32) -> Result<(), Rejection> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Ok(());
        }
        let shapes: Vec<&Shape> = ids
            .iter()
            .filter_map(|id| self.shape_store.get(*id).map(|o| &o.shape))
            .collect();
        let bounds = move_bounds_all(shapes.iter().copied(), self.size());
        if !bounds.contains(dx, dy) {
            return Err(Rejection::OutOfBounds);
        }
        let changes = ids
            .iter()
            .zip(shapes)
            .map(|(id, shape)| (*id, shape.translated(dx, dy)))
            .collect();
        self.commit(changes)
    }

    pub fn edit_handle(&mut self, id: u64, handle: Handle, dx: i32, dy: i32) -> Result<(), Rejection> {
        let shape = self.shape_of(id)?;
        let candidate = edit_shape(shape, handle, dx, dy, self.size())?;
        self.commit(BTreeMap::from([(id, candidate)]))
    }

    pub fn rotate(&mut self, id: u64, direction: RotateDirection) -> Result<(), Rejection> {
        let shape = self.shape_of(id)?;
        let candidate = rotate(shape, direction, self.size())?;
        self.commit(BTreeMap::from([(id, candidate)]))
    }

    /// Commits a candidate produced elsewhere, such as a finished drag.
    pub fn replace_shape(&mut self, id: u64, shape: Shape) -> Result<(), Rejection> {
        self.shape_of(id)?;
        validate(&shape, self.size())?;
        self.commit(BTreeMap::from([(id, shape)]))
    }

    /// Makes `scope_id` a grid of `pattern_id`. An existing grid role of the
    /// scope is replaced.
    pub fn create_grid(
        &mut self,
        scope_id: u64,
        pattern_id: u64,
        params: GridParameters,
    ) -> Result<(), Rejection> {
        if scope_id == pattern_id {
            return Err(GridError::SelfBond { id: scope_id }.into());
        }
        let scope = self.shape_of(scope_id)?;
        let pattern = self.shape_of(pattern_id)?;
        let tiles = generate_tiles(pattern, scope, &params, self.size())?;
        debug!(
            "Shape {} is now a grid of {} with {} tiles",
            scope_id,
            pattern_id,
            tiles.len()
        );

        self.unbond(scope_id);
        if let Some(pattern) = self.shape_store.get_mut(pattern_id) {
            pattern.bonded_grids.insert(scope_id);
        }
        if let Some(scope) = self.shape_store.get_mut(scope_id) {
            scope.grid = Some(Grid {
                pattern: pattern_id,
                params,
                tiles,
            });
        }
        Ok(())
    }

    /// Replaces the parameters of a grid. Nothing changes when the new
    /// parameters cannot be tiled.
    pub fn set_grid_parameters(&mut self, id: u64, params: GridParameters) -> Result<(), Rejection> {
        let tiles = self.compute_tiles(id, Some(params), &BTreeMap::new())?;
        if let Some(grid) = self.shape_store.get_mut(id).and_then(|o| o.grid.as_mut()) {
            grid.params = params;
            grid.tiles = tiles;
        }
        Ok(())
    }

    /// Regenerates the tiles of a grid. A failed recompute keeps the
    /// previous tiles.
    pub fn recompute(&mut self, id: u64) -> Result<(), GridError> {
        let tiles = self.compute_tiles(id, None, &BTreeMap::new())?;
        if let Some(grid) = self.shape_store.get_mut(id).and_then(|o| o.grid.as_mut()) {
            grid.tiles = tiles;
        }
        Ok(())
    }

    /// Recomputes every grid and reports the ones that failed.
    pub fn recompute_all(&mut self) -> Vec<(u64, GridError)> {
        let grid_ids: Vec<u64> = self
            .shapes()
            .filter(|o| o.is_grid())
            .map(|o| o.id)
            .collect();
        grid_ids
            .into_iter()
            .filter_map(|id| self.recompute(id).err().map(|e| (id, e)))
            .collect()
    }

    /// Drops the grid role of a shape, keeping it as a plain shape.
    pub fn ungrid(&mut self, id: u64) -> Result<(), Rejection> {
        self.shape_of(id)?;
        if !self.unbond(id) {
            return Err(GridError::NotAGrid { id }.into());
        }
        Ok(())
    }

    /// Converts the tiles of a grid into independent shapes numbered in
    /// tile order. Returns the ids of the new shapes.
    pub fn freeze_grid(&mut self, id: u64) -> Result<Vec<u64>, Rejection> {
        let obj = self
            .shape_store
            .get(id)
            .ok_or(Rejection::ShapeNotFound(id))?;
        let grid = obj.grid.as_ref().ok_or(GridError::NotAGrid { id })?;
        let pattern_id = grid.pattern;
        let pattern = self.shape_of(pattern_id)?;
        let plan = freeze_plan(pattern, &grid.tiles, &obj.properties);

        if let Some(properties) = plan.pattern_properties {
            if let Some(pattern) = self.shape_store.get_mut(pattern_id) {
                pattern.properties = properties;
            }
        }
        let mut created = Vec::with_capacity(plan.shapes.len());
        for (shape, properties) in plan.shapes {
            let new_id = self.shape_store.generate_id();
            self.shape_store.insert(
                new_id,
                DrawingObject::new(new_id, shape).with_properties(properties),
            );
            created.push(new_id);
        }
        self.unbond(id);
        debug!("Froze grid {} into {} new shapes", id, created.len());
        Ok(created)
    }

    fn shape_of(&self, id: u64) -> Result<&Shape, Rejection> {
        self.shape_store
            .get(id)
            .map(|o| &o.shape)
            .ok_or(Rejection::ShapeNotFound(id))
    }

    /// Removes the grid role of `id` and the matching back reference.
    /// Returns whether the shape was a grid.
    fn unbond(&mut self, id: u64) -> bool {
        let Some(grid) = self.shape_store.get_mut(id).and_then(|o| o.grid.take()) else {
            return false;
        };
        if let Some(pattern) = self.shape_store.get_mut(grid.pattern) {
            pattern.bonded_grids.remove(&id);
        }
        true
    }

    /// Tiles of grid `id` with optional replacement parameters and shapes.
    fn compute_tiles(
        &self,
        id: u64,
        params: Option<GridParameters>,
        overrides: &BTreeMap<u64, Shape>,
    ) -> Result<Vec<Tile>, GridError> {
        let obj = self.shape_store.get(id).ok_or(GridError::NotAGrid { id })?;
        let grid = obj.grid.as_ref().ok_or(GridError::NotAGrid { id })?;
        let pattern_obj = self
            .shape_store
            .get(grid.pattern)
            .ok_or(GridError::PatternNotFound { id: grid.pattern })?;
        let scope = overrides.get(&id).unwrap_or(&obj.shape);
        let pattern = overrides.get(&grid.pattern).unwrap_or(&pattern_obj.shape);
        generate_tiles(pattern, scope, &params.unwrap_or(grid.params), self.size())
    }

    /// Grids whose tiles depend on any of `ids`.
    fn affected_grids(&self, ids: impl IntoIterator<Item = u64>) -> BTreeSet<u64> {
        let mut affected = BTreeSet::new();
        for id in ids {
            if let Some(obj) = self.shape_store.get(id) {
                if obj.is_grid() {
                    affected.insert(id);
                }
                affected.extend(obj.bonded_grids.iter().copied());
            }
        }
        affected
    }

    /// Writes candidate shapes after recomputing every affected grid.
    fn commit(&mut self, changes: BTreeMap<u64, Shape>) -> Result<(), Rejection> {
        let affected = self.affected_grids(changes.keys().copied());
        let mut recomputed = Vec::with_capacity(affected.len());
        for grid_id in affected {
            match self.compute_tiles(grid_id, None, &changes) {
                Ok(tiles) => recomputed.push((grid_id, tiles)),
                Err(e) => {
                    warn!("Rejecting commit: grid {} cannot be recomputed: {}", grid_id, e);
                    return Err(e.into());
                }
            }
        }
        for (id, shape) in changes {
            if let Some(obj) = self.shape_store.get_mut(id) {
                debug!("Committing shape {}: {}", id, shape);
                obj.shape = shape;
            }
        }
        for (grid_id, tiles) in recomputed {
            if let Some(grid) = self.shape_store.get_mut(grid_id).and_then(|o| o.grid.as_mut()) {
                grid.tiles = tiles;
            }
        }
        Ok(())
    }
}
