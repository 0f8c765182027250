use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Chart container size in CSS/device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` for a finite container with a non-zero area.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Accepts zero-size containers (a transient layout state) but rejects
    /// negative or non-finite sizes.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Clamps a point into `[inset, size - inset]` on both axes.
    ///
    /// Containers too small for the inset collapse to their center line.
    #[must_use]
    pub fn clamp_inset(self, point: Point, inset: f64) -> Point {
        Point::new(
            clamp_span(point.x, inset, self.width - inset),
            clamp_span(point.y, inset, self.height - inset),
        )
    }
}

fn clamp_span(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}

/// Position in pixel space, relative to the chart container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Manhattan distance, used for lasso vertex thinning.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Position in data space (the units of the plotted columns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis a single scale maps along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleAxis {
    X,
    Y,
}

/// Axis set a gesture is allowed to affect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    X,
    Y,
    #[default]
    XY,
}

impl Direction {
    #[must_use]
    pub const fn affects_x(self) -> bool {
        !matches!(self, Self::Y)
    }

    #[must_use]
    pub const fn affects_y(self) -> bool {
        !matches!(self, Self::X)
    }
}

/// Axis-aligned rectangle normalized so `x0 <= x1` and `y0 <= y1`.
///
/// Brushes live in pixel space; selection code also uses it for the
/// data-space rectangle obtained by inverting a brush through the scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Builds a normalized rectangle from two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }
}
