use crate::core::types::{BrushRect, DataPoint, Point};

/// Planar coordinate accessor shared by pixel-space and data-space points.
pub trait Planar: Copy {
    fn x(self) -> f64;
    fn y(self) -> f64;
}

impl Planar for Point {
    fn x(self) -> f64 {
        self.x
    }

    fn y(self) -> f64 {
        self.y
    }
}

impl Planar for DataPoint {
    fn x(self) -> f64 {
        self.x
    }

    fn y(self) -> f64 {
        self.y
    }
}

/// Even-odd ray-casting test against an implicitly closed polygon.
///
/// Fewer than three vertices or a zero-area outline never contain anything.
/// Repeated and collinear vertices are tolerated.
#[must_use]
pub fn point_in_polygon<P: Planar, V: Planar>(point: P, polygon: &[V]) -> bool {
    if has_zero_area(polygon) {
        return false;
    }

    let (px, py) = (point.x(), point.y());
    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        let (x, y) = (current.x(), current.y());
        let (prev_x, prev_y) = (previous.x(), previous.y());
        // The straddle check guarantees `prev_y != y`, so the division is safe.
        if (y > py) != (prev_y > py) && px < (prev_x - x) * (py - y) / (prev_y - y) + x {
            inside = !inside;
        }
        previous = current;
    }
    inside
}

/// Inclusive axis-aligned test: points on any edge are inside.
#[must_use]
pub fn point_in_rect<P: Planar>(point: P, rect: &BrushRect) -> bool {
    let (x, y) = (point.x(), point.y());
    x >= rect.x0 && x <= rect.x1 && y >= rect.y0 && y <= rect.y1
}

/// Unsigned shoelace area of the closed outline.
#[must_use]
pub fn polygon_area<V: Planar>(polygon: &[V]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        twice_area += previous.x() * current.y() - current.x() * previous.y();
        previous = current;
    }
    (twice_area / 2.0).abs()
}

/// `true` for fewer than three vertices or an outline whose shoelace area is
/// rounding noise relative to its extent (e.g. collinear fractional vertices).
#[must_use]
pub fn has_zero_area<V: Planar>(polygon: &[V]) -> bool {
    if polygon.len() < 3 {
        return true;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for vertex in polygon {
        min_x = min_x.min(vertex.x());
        max_x = max_x.max(vertex.x());
        min_y = min_y.min(vertex.y());
        max_y = max_y.max(vertex.y());
    }
    let extent = (max_x - min_x).max(max_y - min_y);
    let tolerance = f64::EPSILON * polygon.len() as f64 * extent * extent;
    polygon_area(polygon) <= tolerance
}

/// Vertex average; the centroid of regular and most convex outlines.
#[must_use]
pub fn vertex_centroid<V: Planar>(polygon: &[V]) -> Option<Point> {
    if polygon.is_empty() {
        return None;
    }
    let count = polygon.len() as f64;
    let (sum_x, sum_y) = polygon
        .iter()
        .fold((0.0, 0.0), |(sx, sy), vertex| (sx + vertex.x(), sy + vertex.y()));
    Some(Point::new(sum_x / count, sum_y / count))
}

#[cfg(test)]
mod tests {
    use super::{has_zero_area, point_in_polygon, polygon_area};
    use crate::core::types::Point;

    #[test]
    fn repeated_vertices_do_not_break_ray_casting() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
    }

    #[test]
    fn collinear_outline_has_no_area() {
        let line = [Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)];
        assert_eq!(polygon_area(&line), 0.0);
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &line));
    }

    #[test]
    fn fractional_collinear_outline_counts_as_zero_area() {
        let line = [
            Point::new(0.1, 0.7),
            Point::new(10.3, 21.1),
            Point::new(20.5, 41.5),
            Point::new(30.7, 61.9),
        ];
        assert!(has_zero_area(&line));
        assert!(!point_in_polygon(Point::new(15.4, 31.3), &line));

        let sliver = [Point::new(0.0, 0.0), Point::new(30.0, 0.0), Point::new(15.0, 0.5)];
        assert!(!has_zero_area(&sliver));
    }
}
