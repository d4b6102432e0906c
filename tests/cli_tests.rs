use clap::Parser;
use tempfile::{tempdir, TempDir};

use imagemapper::cli::{run, Cli};
use imagemapper::designer::{AreaProperties, BoxCoords, GridParameters};
use imagemapper::{Canvas, Config, DesignFile, Shape, Size};

fn workspace() -> (TempDir, String) {
    workspace_with(|_| {})
}

fn workspace_with(configure: impl FnOnce(&mut Config)) -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let mut settings = Config::default();
    settings.export.map_name = "cli".to_string();
    configure(&mut settings);
    settings.save_to_file(&config).unwrap();
    let config = config.to_string_lossy().into_owned();
    (dir, config)
}

fn run_args(args: &[&str]) -> anyhow::Result<()> {
    run(Cli::try_parse_from(args)?)
}

fn write_grid_design(path: &std::path::Path) {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let scope = canvas
        .add_shape_with_properties(
            Shape::Rectangle(BoxCoords::new(0, 0, 100, 100)),
            AreaProperties::new("cell[#].html", "", "", ""),
        )
        .unwrap();
    let pattern = canvas
        .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 50, 50)))
        .unwrap();
    canvas
        .create_grid(scope, pattern, GridParameters::default())
        .unwrap();
    DesignFile::from_canvas("grid", &canvas)
        .save_to_file(path)
        .unwrap();
}

#[test]
fn test_export_writes_configured_map_name() {
    let (dir, config) = workspace();
    let design = dir.path().join("grid.imap");
    let html = dir.path().join("grid.html");
    write_grid_design(&design);

    run_args(&[
        "imagemapper",
        "--config",
        &config,
        "export",
        design.to_str().unwrap(),
        "--output",
        html.to_str().unwrap(),
    ])
    .unwrap();

    let text = std::fs::read_to_string(&html).unwrap();
    assert!(text.starts_with("<map name=\"cli\">"));
    assert!(text.contains("cell4.html"));
}

#[test]
fn test_import_then_freeze() {
    let (dir, config) = workspace();
    let html = dir.path().join("in.html");
    std::fs::write(
        &html,
        r#"<map name="plan"><area shape="rect" coords="0,0,900,20" href="wide.html"></map>"#,
    )
    .unwrap();
    let imported = dir.path().join("plan.imap");
    run_args(&[
        "imagemapper",
        "--config",
        &config,
        "import",
        html.to_str().unwrap(),
        "--output",
        imported.to_str().unwrap(),
    ])
    .unwrap();
    let design = DesignFile::load_from_file(&imported).unwrap();
    assert_eq!(design.metadata.name, "plan");
    assert_eq!(design.canvas, Size::new(900, 600));
    assert_eq!(design.areas.len(), 1);

    let grid = dir.path().join("grid.imap");
    write_grid_design(&grid);
    run_args(&[
        "imagemapper",
        "--config",
        &config,
        "freeze",
        grid.to_str().unwrap(),
        "--grid",
        "0",
    ])
    .unwrap();
    let frozen = DesignFile::load_from_file(&grid).unwrap();
    assert_eq!(frozen.areas.len(), 5);
    assert!(frozen.areas.iter().all(|a| !a.is_grid && a.bonds.is_empty()));
}

#[test]
fn test_freeze_rejects_plain_shape() {
    let (dir, config) = workspace();
    let grid = dir.path().join("grid.imap");
    write_grid_design(&grid);
    let result = run_args(&[
        "imagemapper",
        "--config",
        &config,
        "freeze",
        grid.to_str().unwrap(),
        "--grid",
        "1",
    ]);
    assert!(result.is_err());
}

fn write_blank_design(path: &std::path::Path) {
    DesignFile::new("blank", Size::new(200, 200))
        .save_to_file(path)
        .unwrap();
}

fn draw_polygon(config: &str, design: &std::path::Path) -> anyhow::Result<()> {
    run_args(&[
        "imagemapper",
        "--config",
        config,
        "draw",
        design.to_str().unwrap(),
        "--kind",
        "polygon",
        "--point",
        "10,10",
        "--point",
        "100,10",
        "--point",
        "100,100",
        "--point",
        "15,14",
        "--href",
        "zone.html",
    ])
}

#[test]
fn test_draw_closes_polygon_within_configured_distance() {
    let (dir, config) = workspace();
    let design = dir.path().join("blank.imap");
    write_blank_design(&design);

    draw_polygon(&config, &design).unwrap();
    let drawn = DesignFile::load_from_file(&design).unwrap();
    assert_eq!(drawn.metadata.name, "blank");
    assert_eq!(drawn.areas.len(), 1);
    assert_eq!(drawn.areas[0].shape_type, "polygon");
    assert_eq!(drawn.areas[0].coords, vec![10, 10, 100, 10, 100, 100]);
    assert_eq!(drawn.areas[0].properties.href, "zone.html");

    let (dir, config) = workspace_with(|c| c.designer.polygon_close_distance = 5.0);
    let design = dir.path().join("blank.imap");
    write_blank_design(&design);
    assert!(draw_polygon(&config, &design).is_err());
    assert!(DesignFile::load_from_file(&design).unwrap().areas.is_empty());
}

#[test]
fn test_draw_rejects_unknown_kind() {
    let result = Cli::try_parse_from([
        "imagemapper",
        "draw",
        "plan.imap",
        "--kind",
        "star",
        "--point",
        "1,1",
    ]);
    assert!(result.is_err());
}

fn write_unbonded_design(path: &std::path::Path) {
    let mut canvas = Canvas::new(Size::new(200, 200));
    canvas
        .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 100, 100)))
        .unwrap();
    canvas
        .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 20, 20)))
        .unwrap();
    DesignFile::from_canvas("cells", &canvas)
        .save_to_file(path)
        .unwrap();
}

fn tile_count(path: &std::path::Path) -> usize {
    let loaded = DesignFile::load_from_file(path).unwrap().to_canvas();
    let scope = loaded.canvas.shapes().next().unwrap().id;
    loaded.canvas.grid_tiles(scope).unwrap().len()
}

#[test]
fn test_grid_uses_configured_parameters() {
    let (dir, config) = workspace_with(|c| c.designer.grid.spacing = 10);
    let design = dir.path().join("cells.imap");
    write_unbonded_design(&design);

    let args = [
        "imagemapper",
        "--config",
        config.as_str(),
        "grid",
        design.to_str().unwrap(),
        "--scope",
        "0",
        "--pattern",
        "1",
    ];
    run_args(&args).unwrap();
    let bonded = DesignFile::load_from_file(&design).unwrap();
    assert!(bonded.areas[0].is_grid);
    assert_eq!(bonded.areas[0].grid_space, Some(10));
    // steps of 30: 0, 30, 60 on both axes
    assert_eq!(tile_count(&design), 9);

    write_unbonded_design(&design);
    let mut overridden = args.to_vec();
    overridden.extend(["--spacing", "0"]);
    run_args(&overridden).unwrap();
    assert_eq!(tile_count(&design), 25);
}
