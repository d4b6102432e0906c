use imagemapper_core::{Bounds, Point, PointF};

/// Twice the signed shoelace area. Positive when the vertices run clockwise
/// on screen (y pointing down).
pub fn signed_area2(points: &[PointF]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

pub fn is_valid_polygon(points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let pts: Vec<PointF> = points.iter().map(|p| p.to_f64()).collect();
    signed_area2(&pts).abs() > f64::EPSILON
}

pub fn polygon_bounds(points: &[Point]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds::new(0, 0, 0, 0))
}

pub fn translate_points(points: &[Point], dx: i32, dy: i32) -> Vec<Point> {
    points.iter().map(|p| p.translated(dx, dy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_polygon_is_invalid() {
        assert!(!is_valid_polygon(&[
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(10, 10)
        ]));
        assert!(is_valid_polygon(&[
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10)
        ]));
    }

    #[test]
    fn test_clockwise_on_screen_is_positive() {
        let square = [
            PointF::new(0.0, 0.0),
            PointF::new(10.0, 0.0),
            PointF::new(10.0, 10.0),
            PointF::new(0.0, 10.0),
        ];
        assert_eq!(signed_area2(&square), 200.0);
    }
}
