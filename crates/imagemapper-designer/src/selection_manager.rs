//! Which areas the next move or edit applies to.
//!
//! Selection lives on the stored areas (`DrawingObject::selected`), so a
//! group move visits exactly the flagged areas. The manager adds a focus:
//! the area whose handles are shown and which `edit_handle` and `rotate`
//! act on. Grid tiles are derived and never selectable; clicking a tile
//! hits the scope or pattern underneath, if any.

use imagemapper_core::PointF;

use crate::shape_store::ShapeStore;

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    focus: Option<u64>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Area with visible handles.
    pub fn selected_id(&self) -> Option<u64> {
        self.focus
    }

    pub fn deselect_all(&mut self, store: &mut ShapeStore) {
        for obj in store.iter_mut() {
            obj.selected = false;
        }
        self.focus = None;
    }

    /// Flags every area; the topmost takes the focus.
    pub fn select_all(&mut self, store: &mut ShapeStore) {
        for obj in store.iter_mut() {
            obj.selected = true;
        }
        self.focus = store.draw_order_iter().last();
    }

    /// Selects area `id`. With `multi` the area is toggled and the rest of
    /// the selection kept, as for a shift-click. Returns `false` for an
    /// unknown id.
    pub fn select(&mut self, store: &mut ShapeStore, id: u64, multi: bool) -> bool {
        if !store.contains(id) {
            return false;
        }
        if !multi {
            self.deselect_all(store);
        }
        let Some(obj) = store.get_mut(id) else {
            return false;
        };
        obj.selected = !(multi && obj.selected);
        if obj.selected {
            self.focus = Some(id);
        } else if self.focus == Some(id) {
            self.focus = first_selected(store, id);
        }
        true
    }

    /// Click at `point`: the topmost area containing it is selected. A
    /// plain click on empty canvas clears the selection.
    pub fn select_at(&mut self, store: &mut ShapeStore, point: PointF, multi: bool) -> Option<u64> {
        let hit = store
            .iter()
            .rev()
            .find(|obj| obj.shape.contains_point(point))
            .map(|obj| obj.id);

        match hit {
            Some(id) => {
                self.select(store, id, multi);
            }
            None if !multi => self.deselect_all(store),
            None => {}
        }
        self.focus
    }

    /// Flagged areas in draw order.
    pub fn selected_ids(&self, store: &ShapeStore) -> Vec<u64> {
        store.iter().filter(|o| o.selected).map(|o| o.id).collect()
    }

    /// Moves the focus off an area that is being removed.
    pub fn forget(&mut self, store: &ShapeStore, id: u64) {
        if self.focus == Some(id) {
            self.focus = first_selected(store, id);
        }
    }
}

fn first_selected(store: &ShapeStore, except: u64) -> Option<u64> {
    store
        .iter()
        .find(|o| o.selected && o.id != except)
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawingObject;
    use crate::model::{BoxCoords, Shape};

    fn store_with_overlap() -> (ShapeStore, u64, u64) {
        let mut store = ShapeStore::new();
        let below = store.generate_id();
        store.insert(
            below,
            DrawingObject::new(below, Shape::Rectangle(BoxCoords::new(0, 0, 50, 50))),
        );
        let above = store.generate_id();
        store.insert(
            above,
            DrawingObject::new(above, Shape::Rectangle(BoxCoords::new(25, 25, 50, 50))),
        );
        (store, below, above)
    }

    #[test]
    fn test_click_hits_topmost_area() {
        let (mut store, below, above) = store_with_overlap();
        let mut selection = SelectionManager::new();

        assert_eq!(selection.select_at(&mut store, PointF::new(30.0, 30.0), false), Some(above));
        assert_eq!(selection.select_at(&mut store, PointF::new(10.0, 10.0), false), Some(below));
        assert_eq!(selection.selected_ids(&store), vec![below]);

        assert_eq!(selection.select_at(&mut store, PointF::new(190.0, 190.0), false), None);
        assert!(selection.selected_ids(&store).is_empty());
    }

    #[test]
    fn test_shift_click_toggles_and_moves_focus() {
        let (mut store, below, above) = store_with_overlap();
        let mut selection = SelectionManager::new();
        selection.select(&mut store, below, false);
        selection.select(&mut store, above, true);
        assert_eq!(selection.selected_ids(&store), vec![below, above]);
        assert_eq!(selection.selected_id(), Some(above));

        selection.select(&mut store, above, true);
        assert_eq!(selection.selected_ids(&store), vec![below]);
        assert_eq!(selection.selected_id(), Some(below));
        assert!(!selection.select(&mut store, 99, false));
    }
}
