pub mod inclusion;
pub mod scale;
pub mod selection;
pub mod transform;
pub mod types;

pub use inclusion::{
    Planar, has_zero_area, point_in_polygon, point_in_rect, polygon_area, vertex_centroid,
};
pub use scale::{ComposedScale, LinearScale, ScaleComposer, ScalePair, compose, finite_extent};
pub use selection::{invert_polygon, invert_rect, select_in_brush, select_in_lasso};
pub use transform::{
    AffineTransform, ContainViewport, TransformConstraint, Unconstrained, ZoomExtent,
    contain_viewport,
};
pub use types::{BrushRect, DataPoint, Direction, Point, ScaleAxis, Viewport};
