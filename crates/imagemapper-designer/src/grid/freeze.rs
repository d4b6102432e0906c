//! Freezing a grid into independent shapes.

use super::Tile;
use crate::model::Shape;
use crate::properties::AreaProperties;

/// What freezing a grid adds to the canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreezePlan {
    /// Numbered properties for the pattern when one tile coincides with it.
    pub pattern_properties: Option<AreaProperties>,
    /// New shapes in tile order.
    pub shapes: Vec<(Shape, AreaProperties)>,
}

/// Numbers the ordered tiles from 1. The first tile equal to the pattern
/// keeps the pattern shape instead of duplicating it.
pub fn freeze_plan(pattern: &Shape, tiles: &[Tile], properties: &AreaProperties) -> FreezePlan {
    let mut plan = FreezePlan::default();
    for (i, tile) in tiles.iter().enumerate() {
        let numbered = properties.numbered(i + 1);
        if plan.pattern_properties.is_none() && tile.shape == *pattern {
            plan.pattern_properties = Some(numbered);
        } else {
            plan.shapes.push((tile.shape.clone(), numbered));
        }
    }
    plan
}
