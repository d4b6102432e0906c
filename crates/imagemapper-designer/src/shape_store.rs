//! Ordered storage of canvas objects.

use std::collections::BTreeMap;

use crate::canvas::DrawingObject;

/// Objects keyed by id, plus their draw order (back to front).
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    objects: BTreeMap<u64, DrawingObject>,
    draw_order: Vec<u64>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts at the front of the draw order, replacing any object with the
    /// same id.
    pub fn insert(&mut self, id: u64, obj: DrawingObject) {
        if self.objects.insert(id, obj).is_none() {
            self.draw_order.push(id);
        }
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<DrawingObject> {
        let obj = self.objects.remove(&id)?;
        self.draw_order.retain(|&other| other != id);
        Some(obj)
    }

    pub fn get(&self, id: u64) -> Option<&DrawingObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut DrawingObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DrawingObject> {
        self.draw_order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Objects in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DrawingObject> {
        self.objects.values_mut()
    }

    pub fn draw_order_iter(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.draw_order.iter().copied()
    }

    /// Position of `id` in the draw order.
    pub fn draw_index(&self, id: u64) -> Option<usize> {
        self.draw_order.iter().position(|&other| other == id)
    }
}
