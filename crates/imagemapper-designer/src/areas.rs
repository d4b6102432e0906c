//! HTML image-map export and import.
//!
//! Export writes one `<area>` per plain shape and one per grid tile. Import
//! reads `<area>` tags back with regular expressions; anything the parser
//! cannot turn into a shape is skipped and reported.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use imagemapper_core::{Point, PointF};

use crate::canvas::{Canvas, DrawingObject};
use crate::model::{sample_ellipse, AreaType, BoxCoords, CircleCoords, Shape};
use crate::properties::AreaProperties;

/// Segment count used for ellipses, which HTML cannot describe.
pub const EXPORT_ELLIPSE_SEGMENTS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub map_name: String,
    pub ellipse_segments: usize,
    /// Write `alt=""` and friends for properties left empty.
    pub include_empty_attributes: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            map_name: "imagemap".to_string(),
            ellipse_segments: EXPORT_ELLIPSE_SEGMENTS,
            include_empty_attributes: false,
        }
    }
}

/// `shape` value and flattened `coords` of one area.
pub fn area_coords(shape: &Shape, ellipse_segments: usize) -> (AreaType, Vec<i32>) {
    match shape {
        Shape::Rectangle(c) | Shape::Square(c) => {
            (AreaType::Rect, vec![c.x, c.y, c.x + c.width, c.y + c.height])
        }
        Shape::CircleFromCenter(c) | Shape::CircleFromDiameter(c) => {
            (AreaType::Circle, vec![c.x, c.y, c.r])
        }
        Shape::Ellipse(c) => {
            let points = sample_ellipse(
                c.center(),
                c.width as f64 / 2.0,
                c.height as f64 / 2.0,
                ellipse_segments.max(3),
            );
            (AreaType::Poly, flatten(points.into_iter().map(PointF::round)))
        }
        _ => (
            AreaType::Poly,
            flatten(shape.vertices().unwrap_or_default().into_iter()),
        ),
    }
}

fn flatten(points: impl Iterator<Item = Point>) -> Vec<i32> {
    points.flat_map(|p| [p.x, p.y]).collect()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn write_area(out: &mut String, shape: &Shape, properties: &AreaProperties, options: &ExportOptions) {
    let (area_type, coords) = area_coords(shape, options.ellipse_segments);
    let coords = coords
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let _ = write!(out, "  <area shape=\"{}\" coords=\"{}\"", area_type.as_str(), coords);
    for (name, value) in properties.attributes() {
        if !value.is_empty() || options.include_empty_attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
    }
    out.push_str(" />\n");
}

/// Renders the canvas as an HTML `<map>` element.
///
/// Shapes are written in draw order. A grid writes its tiles in tile order
/// instead of its scope shape, each with the grid's properties numbered
/// from 1. A pattern that one of its grids covers with a tile is written
/// only as that tile, as freezing would keep it. A grid whose pattern is
/// itself a grid writes nothing.
pub fn export_map(canvas: &Canvas, options: &ExportOptions) -> String {
    let mut out = format!("<map name=\"{}\">\n", escape(&options.map_name));
    for obj in canvas.shapes() {
        let Some(grid) = &obj.grid else {
            if written_as_tile(canvas, obj) {
                debug!("Pattern {} is written as a tile of its grid", obj.id);
            } else {
                write_area(&mut out, &obj.shape, &obj.properties, options);
            }
            continue;
        };
        if is_nested(canvas, grid.pattern) {
            debug!("Skipping grid {}: its pattern {} is a grid", obj.id, grid.pattern);
            continue;
        }
        for (i, tile) in grid.tiles.iter().enumerate() {
            write_area(&mut out, &tile.shape, &obj.properties.numbered(i + 1), options);
        }
    }
    out.push_str("</map>\n");
    out
}

fn is_nested(canvas: &Canvas, pattern: u64) -> bool {
    canvas
        .get_shape(pattern)
        .is_some_and(|pattern| pattern.is_grid())
}

/// A pattern coinciding with a tile of an exported grid.
fn written_as_tile(canvas: &Canvas, obj: &DrawingObject) -> bool {
    obj.bonded_grids.iter().any(|&id| {
        canvas
            .get_shape(id)
            .and_then(|scope| scope.grid.as_ref())
            .is_some_and(|grid| {
                !is_nested(canvas, grid.pattern) && grid.tiles.iter().any(|t| t.shape == obj.shape)
            })
    })
}

/// Why an `<area>` tag could not be imported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AreaError {
    #[error("missing attribute '{0}'")]
    MissingAttribute(&'static str),

    #[error("unsupported shape '{0}'")]
    UnsupportedShape(String),

    #[error("invalid coords '{coords}' for {shape}")]
    InvalidCoords { shape: String, coords: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedMap {
    pub name: Option<String>,
    pub areas: Vec<(Shape, AreaProperties)>,
    /// Index of each skipped `<area>` tag with the reason.
    pub skipped: Vec<(usize, AreaError)>,
}

fn area_regex() -> &'static Regex {
    static AREA: OnceLock<Regex> = OnceLock::new();
    AREA.get_or_init(|| Regex::new(r"(?is)<area\b([^>]*?)/?>").expect("invalid regex pattern"))
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"(?i)([a-z][a-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("invalid regex pattern")
    })
}

fn map_name_regex() -> &'static Regex {
    static MAP: OnceLock<Regex> = OnceLock::new();
    MAP.get_or_init(|| {
        Regex::new(r#"(?is)<map\b[^>]*?\bname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex pattern")
    })
}

fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn parse_coords(value: &str) -> Option<Vec<i32>> {
    value
        .split(',')
        .map(|n| n.trim().parse::<f64>().ok().map(|v| v.round() as i32))
        .collect()
}

/// Builds a shape from an `<area>`'s `shape` and `coords` values.
pub fn parse_area(shape: &str, coords: &str) -> Result<Shape, AreaError> {
    let kind = shape.trim().to_ascii_lowercase();
    let invalid = || AreaError::InvalidCoords {
        shape: kind.clone(),
        coords: coords.to_string(),
    };
    let values = parse_coords(coords).ok_or_else(invalid)?;
    let parsed = match (kind.as_str(), values.as_slice()) {
        ("rect" | "rectangle", &[x1, y1, x2, y2]) => {
            let coords = BoxCoords::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs());
            if coords.width == coords.height {
                Shape::Square(coords)
            } else {
                Shape::Rectangle(coords)
            }
        }
        ("circle" | "circ", &[x, y, r]) => Shape::CircleFromCenter(CircleCoords::new(x, y, r)),
        ("poly" | "polygon", values) if values.len() >= 6 && values.len() % 2 == 0 => {
            Shape::Polygon(values.chunks_exact(2).map(|p| Point::new(p[0], p[1])).collect())
        }
        ("rect" | "rectangle" | "circle" | "circ" | "poly" | "polygon", _) => return Err(invalid()),
        _ => return Err(AreaError::UnsupportedShape(kind.clone())),
    };
    if parsed.is_valid() {
        Ok(parsed)
    } else {
        Err(invalid())
    }
}

/// Parses every `<area>` tag in `html`.
pub fn import_map(html: &str) -> ImportedMap {
    let name = map_name_regex()
        .captures(html)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| unescape(m.as_str()));
    let mut imported = ImportedMap {
        name,
        ..ImportedMap::default()
    };

    for (index, tag) in area_regex().captures_iter(html).enumerate() {
        let body = tag.get(1).map_or("", |m| m.as_str());
        let attributes: Vec<(String, String)> = attribute_regex()
            .captures_iter(body)
            .filter_map(|c| {
                let key = c.get(1)?.as_str().to_string();
                let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
                Some((key, unescape(value.as_str())))
            })
            .collect();

        let result = attribute(&attributes, "coords")
            .ok_or(AreaError::MissingAttribute("coords"))
            .and_then(|coords| parse_area(attribute(&attributes, "shape").unwrap_or("rect"), coords));
        match result {
            Ok(shape) => {
                let get = |name| attribute(&attributes, name).unwrap_or_default();
                let properties = AreaProperties::new(get("href"), get("alt"), get("title"), get("id"));
                imported.areas.push((shape, properties));
            }
            Err(e) => {
                warn!("Skipping <area> #{}: {}", index, e);
                imported.skipped.push((index, e));
            }
        }
    }
    debug!(
        "Imported {} areas, skipped {}",
        imported.areas.len(),
        imported.skipped.len()
    );
    imported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridParameters;
    use imagemapper_core::Size;

    #[test]
    fn test_area_coords_per_kind() {
        let rect = Shape::Rectangle(BoxCoords::new(10, 20, 30, 40));
        assert_eq!(area_coords(&rect, 24), (AreaType::Rect, vec![10, 20, 40, 60]));

        let circle = Shape::CircleFromDiameter(CircleCoords::new(50, 50, 8));
        assert_eq!(area_coords(&circle, 24), (AreaType::Circle, vec![50, 50, 8]));

        let ellipse = Shape::Ellipse(BoxCoords::new(0, 0, 40, 20));
        let (area_type, coords) = area_coords(&ellipse, 24);
        assert_eq!(area_type, AreaType::Poly);
        assert_eq!(coords.len(), 48);
        assert_eq!(&coords[..2], &[40, 10]);

        let hex = Shape::HexFromDiameter(CircleCoords::new(50, 50, 10));
        assert_eq!(area_coords(&hex, 24).1.len(), 12);
    }

    #[test]
    fn test_export_writes_numbered_tiles() {
        let mut canvas = Canvas::new(Size::new(200, 200));
        let scope = canvas
            .add_shape_with_properties(
                Shape::Rectangle(BoxCoords::new(0, 0, 100, 100)),
                AreaProperties::new("page[#].html", "Cell [#]", "", ""),
            )
            .unwrap();
        let pattern = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 50, 50)))
            .unwrap();
        canvas
            .create_grid(scope, pattern, GridParameters::default())
            .unwrap();

        let html = export_map(&canvas, &ExportOptions::default());
        assert!(html.starts_with("<map name=\"imagemap\">"));
        assert!(html.contains("href=\"page1.html\""));
        assert!(html.contains("alt=\"Cell 4\""));
        assert!(!html.contains("title="));
        // the pattern is tile 1
        assert_eq!(html.matches("<area").count(), 4);
        assert_eq!(html.matches("coords=\"0,0,50,50\"").count(), 1);
    }

    #[test]
    fn test_pattern_away_from_its_tiles_is_written() {
        let mut canvas = Canvas::new(Size::new(200, 200));
        let scope = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 100, 100)))
            .unwrap();
        let pattern = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(150, 150, 50, 50)))
            .unwrap();
        canvas
            .create_grid(scope, pattern, GridParameters::default())
            .unwrap();

        let html = export_map(&canvas, &ExportOptions::default());
        assert_eq!(html.matches("<area").count(), 5);
        assert!(html.contains("coords=\"150,150,200,200\""));
    }

    #[test]
    fn test_grid_of_grid_is_suppressed() {
        let mut canvas = Canvas::new(Size::new(300, 300));
        let outer = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 200, 200)))
            .unwrap();
        let inner = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 100, 100)))
            .unwrap();
        let cell = canvas
            .add_shape(Shape::Rectangle(BoxCoords::new(0, 0, 50, 50)))
            .unwrap();
        canvas.create_grid(inner, cell, GridParameters::default()).unwrap();
        canvas.create_grid(outer, inner, GridParameters::default()).unwrap();

        let html = export_map(&canvas, &ExportOptions::default());
        // inner grid tiles only; the outer grid is skipped
        assert_eq!(html.matches("<area").count(), 4);
    }

    #[test]
    fn test_import_reads_shapes_and_attributes() {
        let html = r#"
            <map name="nav">
              <area shape="rect" coords="0,0,20,20" href="a.html" alt="A &amp; B">
              <AREA SHAPE="circle" COORDS="50, 50, 10" title='round' />
              <area shape="poly" coords="0,0,10,0,10,10">
              <area shape="default" href="x">
              <area shape="poly" coords="0,0,10">
            </map>"#;
        let imported = import_map(html);
        assert_eq!(imported.name.as_deref(), Some("nav"));
        assert_eq!(imported.areas.len(), 3);
        assert_eq!(imported.areas[0].0, Shape::Square(BoxCoords::new(0, 0, 20, 20)));
        assert_eq!(imported.areas[0].1.alt, "A & B");
        assert_eq!(imported.areas[1].0, Shape::CircleFromCenter(CircleCoords::new(50, 50, 10)));
        assert_eq!(imported.areas[1].1.title, "round");
        assert!(matches!(imported.areas[2].0, Shape::Polygon(ref p) if p.len() == 3));
        assert_eq!(imported.skipped.len(), 2);
        assert_eq!(imported.skipped[0].1, AreaError::MissingAttribute("coords"));
    }

    #[test]
    fn test_export_then_import_keeps_plain_shapes() {
        let mut canvas = Canvas::new(Size::new(200, 200));
        canvas
            .add_shape_with_properties(
                Shape::Rectangle(BoxCoords::new(5, 5, 30, 10)),
                AreaProperties::new("r.html", "", "", ""),
            )
            .unwrap();
        canvas
            .add_shape(Shape::CircleFromCenter(CircleCoords::new(100, 100, 20)))
            .unwrap();
        let imported = import_map(&export_map(&canvas, &ExportOptions::default()));
        let shapes: Vec<Shape> = imported.areas.into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            shapes,
            vec![
                Shape::Rectangle(BoxCoords::new(5, 5, 30, 10)),
                Shape::CircleFromCenter(CircleCoords::new(100, 100, 20)),
            ]
        );
    }
}
