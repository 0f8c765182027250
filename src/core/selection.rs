#[cfg(feature = "parallel-selection")]
use rayon::prelude::*;

use crate::core::inclusion::{point_in_polygon, point_in_rect};
use crate::core::scale::ComposedScale;
use crate::core::types::{BrushRect, DataPoint, Point};

/// Maps a pixel-space outline into data space through the composed scales.
///
/// Vertices that do not invert to finite values are dropped.
#[must_use]
pub fn invert_polygon(
    polygon: &[Point],
    x_scale: ComposedScale,
    y_scale: ComposedScale,
) -> Vec<DataPoint> {
    polygon
        .iter()
        .map(|vertex| DataPoint::new(x_scale.invert(vertex.x), y_scale.invert(vertex.y)))
        .filter(|vertex| vertex.x.is_finite() && vertex.y.is_finite())
        .collect()
}

/// Maps a pixel-space brush into a normalized data-space rectangle.
///
/// Inverted y scales (range running bottom-up) are normalized as well.
#[must_use]
pub fn invert_rect(rect: BrushRect, x_scale: ComposedScale, y_scale: ComposedScale) -> BrushRect {
    BrushRect::from_corners(
        Point::new(x_scale.invert(rect.x0), y_scale.invert(rect.y0)),
        Point::new(x_scale.invert(rect.x1), y_scale.invert(rect.y1)),
    )
}

/// Indices of `points` inside the lasso outline, tested in data space.
#[must_use]
pub fn select_in_lasso(
    points: &[DataPoint],
    lasso: &[Point],
    x_scale: ComposedScale,
    y_scale: ComposedScale,
) -> Vec<usize> {
    let polygon = invert_polygon(lasso, x_scale, y_scale);
    if polygon.len() < 3 {
        return Vec::new();
    }
    select_indices(points, |point| point_in_polygon(point, &polygon))
}

/// Indices of `points` inside the brush rectangle, tested in data space.
#[must_use]
pub fn select_in_brush(
    points: &[DataPoint],
    brush: BrushRect,
    x_scale: ComposedScale,
    y_scale: ComposedScale,
) -> Vec<usize> {
    let bounds = invert_rect(brush, x_scale, y_scale);
    select_indices(points, |point| point_in_rect(point, &bounds))
}

fn select_indices<F>(points: &[DataPoint], predicate: F) -> Vec<usize>
where
    F: Fn(DataPoint) -> bool + Sync,
{
    // Index order is preserved on both paths so callers get stable output.
    #[cfg(feature = "parallel-selection")]
    {
        points
            .par_iter()
            .enumerate()
            .filter(|(_, point)| predicate(**point))
            .map(|(index, _)| index)
            .collect()
    }

    #[cfg(not(feature = "parallel-selection"))]
    {
        points
            .iter()
            .enumerate()
            .filter(|(_, point)| predicate(**point))
            .map(|(index, _)| index)
            .collect()
    }
}
