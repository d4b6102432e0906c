//! Canvas document: shapes, their properties, and the grids bonding them.

mod operations;
mod types;

pub use types::{DrawingObject, Grid};

use tracing::debug;

use imagemapper_core::{PointF, Size};

use crate::edit::{validate, Rejection};
use crate::grid::Tile;
use crate::model::Shape;
use crate::properties::AreaProperties;
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeStore;

/// Canvas state managing shapes and grid bonds.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub shape_store: ShapeStore,
    pub selection_manager: SelectionManager,
    size: Size,
}

impl Canvas {
    /// Creates a canvas covering a `size` image.
    pub fn new(size: Size) -> Self {
        Self {
            shape_store: ShapeStore::new(),
            selection_manager: SelectionManager::new(),
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Changes the image size. Existing shapes are kept even when they no
    /// longer fit; later commits must bring them back on the canvas.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn shape_count(&self) -> usize {
        self.shape_store.len()
    }

    pub fn get_shape(&self, id: u64) -> Option<&DrawingObject> {
        self.shape_store.get(id)
    }

    /// Shapes in draw order.
    pub fn shapes(&self) -> impl DoubleEndedIterator<Item = &DrawingObject> {
        self.shape_store.iter()
    }

    /// Adds a valid shape that fits the canvas and returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> Result<u64, Rejection> {
        self.add_shape_with_properties(shape, AreaProperties::default())
    }

    pub fn add_shape_with_properties(
        &mut self,
        shape: Shape,
        properties: AreaProperties,
    ) -> Result<u64, Rejection> {
        validate(&shape, self.size)?;
        let id = self.shape_store.generate_id();
        debug!("Adding {} as shape {}", shape, id);
        self.shape_store
            .insert(id, DrawingObject::new(id, shape).with_properties(properties));
        Ok(id)
    }

    /// Removes a shape and unbinds it from every bond.
    ///
    /// Removing a grid drops its tiles. Removing a pattern turns every grid
    /// using it back into a plain shape.
    pub fn remove_shape(&mut self, id: u64) -> Option<DrawingObject> {
        let obj = self.shape_store.remove(id)?;
        if let Some(pattern_id) = obj.pattern_id() {
            if let Some(pattern) = self.shape_store.get_mut(pattern_id) {
                pattern.bonded_grids.remove(&id);
            }
        }
        for grid_id in &obj.bonded_grids {
            if let Some(grid) = self.shape_store.get_mut(*grid_id) {
                debug!("Shape {} lost its pattern {} and is no longer a grid", grid_id, id);
                grid.grid = None;
            }
        }
        self.selection_manager.forget(&self.shape_store, id);
        Some(obj)
    }

    pub fn set_properties(&mut self, id: u64, properties: AreaProperties) -> Result<(), Rejection> {
        let obj = self
            .shape_store
            .get_mut(id)
            .ok_or(Rejection::ShapeNotFound(id))?;
        obj.properties = properties;
        Ok(())
    }

    pub fn select_shape(&mut self, id: u64, multi: bool) -> bool {
        self.selection_manager.select(&mut self.shape_store, id, multi)
    }

    pub fn select_at(&mut self, point: PointF, multi: bool) -> Option<u64> {
        self.selection_manager
            .select_at(&mut self.shape_store, point, multi)
    }

    pub fn deselect_all(&mut self) {
        self.selection_manager.deselect_all(&mut self.shape_store);
    }

    pub fn select_all(&mut self) {
        self.selection_manager.select_all(&mut self.shape_store);
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selection_manager.selected_id()
    }

    pub fn selected_ids(&self) -> Vec<u64> {
        self.selection_manager.selected_ids(&self.shape_store)
    }

    /// Current tiles of a grid.
    pub fn grid_tiles(&self, id: u64) -> Option<&[Tile]> {
        self.shape_store
            .get(id)
            .and_then(|obj| obj.grid.as_ref())
            .map(|grid| grid.tiles.as_slice())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(800, 600))
    }
}
