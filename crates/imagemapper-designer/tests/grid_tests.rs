use imagemapper_core::{GridError, PointF, Size};
use imagemapper_designer::grid::{generate_tiles_with, GridAxis, PatternProperties};
use imagemapper_designer::{
    generate_tiles, Alignment, AreaProperties, BoxCoords, Canvas, CircleCoords, GridOrder,
    GridParameters, Handle, Rejection, ScopeMode, Shape, Tilt,
};

fn rect(x: i32, y: i32, w: i32, h: i32) -> Shape {
    Shape::Rectangle(BoxCoords::new(x, y, w, h))
}

#[test]
fn test_rectangle_grid_has_four_tiles() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let scope = canvas.add_shape(rect(0, 0, 100, 100)).unwrap();
    let pattern = canvas.add_shape(rect(0, 0, 50, 50)).unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();

    let tiles = canvas.grid_tiles(scope).unwrap();
    let origins: Vec<(i32, i32)> = tiles
        .iter()
        .map(|t| (t.shape.bounds().min_x, t.shape.bounds().min_y))
        .collect();
    assert_eq!(origins, vec![(0, 0), (50, 0), (0, 50), (50, 50)]);
    assert!(canvas.get_shape(pattern).unwrap().is_pattern());
}

#[test]
fn test_inner_grid_drops_partial_tiles() {
    let pattern = rect(0, 0, 10, 10);
    let scope = rect(0, 0, 25, 25);
    let tiles =
        generate_tiles(&pattern, &scope, &GridParameters::default(), Size::new(100, 100)).unwrap();
    let origins: Vec<(i32, i32)> = tiles
        .iter()
        .map(|t| (t.shape.bounds().min_x, t.shape.bounds().min_y))
        .collect();
    assert_eq!(origins, vec![(0, 0), (10, 0), (0, 10), (10, 10)]);
}

#[test]
fn test_staggered_round_tiles_do_not_overlap() {
    let patterns = [
        Shape::CircleFromCenter(CircleCoords::new(7, 7, 7)),
        Shape::CircleFromDiameter(CircleCoords::new(10, 10, 10)),
        Shape::Ellipse(BoxCoords::new(0, 0, 11, 7)),
        Shape::Ellipse(BoxCoords::new(0, 0, 9, 16)),
    ];
    let scope = rect(0, 0, 300, 300);
    for pattern in &patterns {
        for alignment in [Alignment::AltHorizontal, Alignment::AltVertical] {
            for spacing in [0, 3] {
                let params = GridParameters {
                    alignment,
                    spacing,
                    ..GridParameters::default()
                };
                let tiles =
                    generate_tiles(pattern, &scope, &params, Size::new(300, 300)).unwrap();
                assert!(tiles.len() > 20, "{pattern} {alignment}");

                let size = pattern.bounds().size();
                let (w, h) = (size.width as f64, size.height as f64);
                for (i, a) in tiles.iter().enumerate() {
                    for b in &tiles[i + 1..] {
                        let (ca, cb) = (a.shape.center(), b.shape.center());
                        let dx = (ca.x - cb.x) / w;
                        let dy = (ca.y - cb.y) / h;
                        assert!(
                            dx * dx + dy * dy >= 1.0 - 1e-9,
                            "{pattern} {alignment} spacing {spacing}: {} overlaps {}",
                            a.shape,
                            b.shape
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_outer_circle_scope_keeps_touching_tiles() {
    let pattern = Shape::CircleFromCenter(CircleCoords::new(5, 5, 5));
    let scope = Shape::CircleFromCenter(CircleCoords::new(50, 50, 20));
    let params = GridParameters {
        scope_mode: ScopeMode::Outer,
        ..GridParameters::default()
    };
    let tiles = generate_tiles(&pattern, &scope, &params, Size::new(100, 100)).unwrap();
    let center = PointF::new(50.0, 50.0);

    assert!(!tiles.is_empty());
    assert!(tiles
        .iter()
        .all(|t| t.shape.center().distance_to(&center) <= 25.0));
    assert!(tiles
        .iter()
        .any(|t| t.shape.center().distance_to(&center) > 20.0));
}

#[test]
fn test_inner_mode_is_subset_of_outer_mode() {
    let pattern = rect(0, 0, 12, 8);
    let scope = Shape::Ellipse(BoxCoords::new(10, 10, 120, 80));
    let canvas = Size::new(200, 200);
    let inner = generate_tiles(&pattern, &scope, &GridParameters::default(), canvas).unwrap();
    let outer = generate_tiles(
        &pattern,
        &scope,
        &GridParameters {
            scope_mode: ScopeMode::Outer,
            ..GridParameters::default()
        },
        canvas,
    )
    .unwrap();
    assert!(inner.len() < outer.len());
    assert!(inner.iter().all(|t| outer.iter().any(|o| o.shape == t.shape)));
}

#[test]
fn test_recompute_is_idempotent() {
    let mut canvas = Canvas::new(Size::new(300, 300));
    let scope = canvas
        .add_shape(Shape::HexFromDiameter(CircleCoords::new(150, 150, 100)))
        .unwrap();
    let pattern = canvas
        .add_shape(Shape::IsoscelesTriangle(BoxCoords::new(10, 10, 20, 16)))
        .unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();
    let first = canvas.grid_tiles(scope).unwrap().to_vec();
    canvas.recompute(scope).unwrap();
    assert_eq!(canvas.grid_tiles(scope).unwrap(), first.as_slice());
    assert!(canvas.recompute_all().is_empty());
}

#[test]
fn test_orders_number_the_same_tiles() {
    let pattern = rect(0, 0, 10, 10);
    let scope = rect(0, 0, 40, 30);
    let canvas = Size::new(100, 100);
    let reference = generate_tiles(&pattern, &scope, &GridParameters::default(), canvas).unwrap();

    for order in GridOrder::ALL {
        let params = GridParameters {
            order: *order,
            ..GridParameters::default()
        };
        let tiles = generate_tiles(&pattern, &scope, &params, canvas).unwrap();
        assert_eq!(tiles.len(), reference.len());
        assert!(tiles.iter().all(|t| reference.iter().any(|r| r.shape == t.shape)));
    }

    let params = GridParameters {
        order: GridOrder::RightBottom,
        ..GridParameters::default()
    };
    let tiles = generate_tiles(&pattern, &scope, &params, canvas).unwrap();
    assert_eq!(tiles.first().map(|t| t.shape.bounds().min_x), Some(30));
    assert_eq!(tiles.first().map(|t| t.shape.bounds().min_y), Some(20));
    assert_eq!(tiles.get(1).map(|t| t.shape.bounds().min_y), Some(10));
}

#[test]
fn test_spacing_widens_steps() {
    let pattern = rect(0, 0, 10, 10);
    let scope = rect(0, 0, 100, 10);
    let params = GridParameters {
        spacing: 10,
        ..GridParameters::default()
    };
    let tiles = generate_tiles(&pattern, &scope, &params, Size::new(100, 100)).unwrap();
    let xs: Vec<i32> = tiles.iter().map(|t| t.shape.bounds().min_x).collect();
    assert_eq!(xs, vec![0, 20, 40, 60, 80]);
}

#[test]
fn test_full_overlap_with_column_overlap_is_unsupported() {
    let pattern = Shape::RightTriangle(BoxCoords::new(0, 0, 20, 20));
    let mut props = PatternProperties::plain(GridAxis::Horizontal, Size::new(20, 20), Tilt::Deg0);
    props.row_overlap = -props.row_extent;
    props.column_overlap = -5.0;
    let params = GridParameters {
        alignment: Alignment::AltHorizontal,
        ..GridParameters::default()
    };
    let result = generate_tiles_with(&pattern, &props, &rect(0, 0, 100, 100), &params, Size::new(100, 100));
    assert!(matches!(
        result,
        Err(GridError::UnsupportedConfiguration { ref alignment, .. }) if alignment == "alt-horizontal"
    ));
}

#[test]
fn test_full_overlap_right_triangles_pair_up() {
    let pattern = Shape::RightTriangle(BoxCoords::new(0, 0, 20, 20));
    let params = GridParameters {
        alignment: Alignment::AltHorizontal,
        ..GridParameters::default()
    };
    let tiles = generate_tiles(&pattern, &rect(0, 0, 40, 20), &params, Size::new(100, 100)).unwrap();
    assert_eq!(tiles.len(), 4);
    let tilts: Vec<Tilt> = tiles.iter().map(|t| t.shape.tilt()).collect();
    assert_eq!(tilts, vec![Tilt::Deg0, Tilt::Deg180, Tilt::Deg0, Tilt::Deg180]);
}

#[test]
fn test_freeze_keeps_pattern_and_adds_the_rest() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let scope = canvas
        .add_shape_with_properties(rect(0, 0, 100, 100), AreaProperties::new("", "tile [#]", "", ""))
        .unwrap();
    let pattern = canvas.add_shape(rect(0, 0, 50, 50)).unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();

    let created = canvas.freeze_grid(scope).unwrap();
    assert_eq!(created.len(), 3);
    assert_eq!(canvas.shape_count(), 5);
    assert!(!canvas.get_shape(scope).unwrap().is_grid());
    assert!(!canvas.get_shape(pattern).unwrap().is_pattern());
    assert_eq!(canvas.get_shape(pattern).unwrap().properties.alt, "tile 1");
    let alts: Vec<&str> = created
        .iter()
        .map(|id| canvas.get_shape(*id).unwrap().properties.alt.as_str())
        .collect();
    assert_eq!(alts, vec!["tile 2", "tile 3", "tile 4"]);
}

#[test]
fn test_editing_pattern_recomputes_grid() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let scope = canvas.add_shape(rect(0, 0, 100, 100)).unwrap();
    let pattern = canvas.add_shape(rect(0, 0, 50, 50)).unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();

    canvas.edit_handle(pattern, Handle::Right, -25, 0).unwrap();
    assert_eq!(canvas.grid_tiles(scope).unwrap().len(), 8);

    canvas.edit_handle(scope, Handle::Bottom, 0, -50).unwrap();
    assert_eq!(canvas.grid_tiles(scope).unwrap().len(), 4);
}

#[test]
fn test_rejected_commit_leaves_canvas_untouched() {
    let mut canvas = Canvas::new(Size::new(100, 100));
    let id = canvas.add_shape(rect(10, 10, 50, 20)).unwrap();
    let before = canvas.get_shape(id).unwrap().shape.clone();

    canvas.select_shape(id, false);
    assert_eq!(canvas.move_selected(-11, 0), Err(Rejection::OutOfBounds));
    assert_eq!(canvas.get_shape(id).unwrap().shape, before);

    canvas.move_selected(-10, 5).unwrap();
    assert_eq!(canvas.get_shape(id).unwrap().shape, rect(0, 15, 50, 20));
}

#[test]
fn test_removing_pattern_ungrids_its_grids() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let scope = canvas.add_shape(rect(0, 0, 100, 100)).unwrap();
    let pattern = canvas.add_shape(rect(0, 0, 50, 50)).unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();

    canvas.remove_shape(pattern);
    let obj = canvas.get_shape(scope).unwrap();
    assert!(!obj.is_grid());
    assert_eq!(canvas.grid_tiles(scope), None);
}

#[test]
fn test_self_bond_is_rejected() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let id = canvas.add_shape(rect(0, 0, 100, 100)).unwrap();
    assert_eq!(
        canvas.create_grid(id, id, GridParameters::default()),
        Err(Rejection::GridConfiguration(GridError::SelfBond { id }))
    );
}
