use serde::{Deserialize, Serialize};

use crate::core::types::{Point, ScaleAxis, Viewport};
use crate::error::{ChartError, ChartResult};

/// Uniform-scale-plus-translate view transform: `(x, y) -> (s*x + tx, s*y + ty)`.
///
/// Values are replaced, never mutated in place: every pan/zoom step produces a
/// new transform that the owning surface stores and feeds back on the next event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    scale: f64,
    tx: f64,
    ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn new(scale: f64, tx: f64, ty: f64) -> ChartResult<Self> {
        let candidate = Self { scale, tx, ty };
        if !candidate.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "transform requires finite components and scale > 0 (scale={scale}, tx={tx}, ty={ty})"
            )));
        }
        Ok(candidate)
    }

    /// Builds a pure translation.
    #[must_use]
    pub fn from_translation(tx: f64, ty: f64) -> Self {
        Self {
            scale: 1.0,
            tx,
            ty,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.scale.is_finite() && self.scale > 0.0 && self.tx.is_finite() && self.ty.is_finite()
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn tx(self) -> f64 {
        self.tx
    }

    #[must_use]
    pub fn ty(self) -> f64 {
        self.ty
    }

    /// Translation component that applies along `axis`.
    #[must_use]
    pub fn translation(self, axis: ScaleAxis) -> f64 {
        match axis {
            ScaleAxis::X => self.tx,
            ScaleAxis::Y => self.ty,
        }
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.scale + self.tx
    }

    #[must_use]
    pub fn apply_y(self, y: f64) -> f64 {
        y * self.scale + self.ty
    }

    #[must_use]
    pub fn apply_axis(self, value: f64, axis: ScaleAxis) -> f64 {
        value * self.scale + self.translation(axis)
    }

    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        Point::new(self.apply_x(point.x), self.apply_y(point.y))
    }

    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.tx) / self.scale
    }

    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        (y - self.ty) / self.scale
    }

    #[must_use]
    pub fn invert_axis(self, value: f64, axis: ScaleAxis) -> f64 {
        (value - self.translation(axis)) / self.scale
    }

    #[must_use]
    pub fn invert(self, point: Point) -> Point {
        Point::new(self.invert_x(point.x), self.invert_y(point.y))
    }

    /// Shifts the transform by a pixel delta, leaving the scale unchanged.
    #[must_use]
    pub fn translated_by(self, dx: f64, dy: f64) -> Self {
        Self {
            scale: self.scale,
            tx: self.tx + dx,
            ty: self.ty + dy,
        }
    }

    /// Rescales to `new_scale` while keeping the content under `anchor` fixed.
    ///
    /// Returns `self` unchanged for a non-positive or non-finite `new_scale`.
    #[must_use]
    pub fn rescaled_around(self, new_scale: f64, anchor: Point) -> Self {
        if !new_scale.is_finite() || new_scale <= 0.0 {
            return self;
        }
        let ratio = new_scale / self.scale;
        Self {
            scale: new_scale,
            tx: anchor.x - (anchor.x - self.tx) * ratio,
            ty: anchor.y - (anchor.y - self.ty) * ratio,
        }
    }

    /// Approximate equality used by tests and change detection.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.scale - other.scale).abs() <= epsilon
            && (self.tx - other.tx).abs() <= epsilon
            && (self.ty - other.ty).abs() <= epsilon
    }
}

/// Inclusive `[min, max]` bound on transform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomExtent {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 10.0,
        }
    }
}

impl ZoomExtent {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom extent bounds must be finite and > 0".to_owned(),
            ));
        }
        if self.min > self.max {
            return Err(ChartError::InvalidConfig(format!(
                "zoom extent min ({}) must not exceed max ({})",
                self.min, self.max
            )));
        }
        Ok(self)
    }

    /// Unvalidated extents never panic here; `max` wins when the bounds cross.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Post-processing step applied to every candidate transform a controller proposes.
pub trait TransformConstraint {
    fn constrain(&self, candidate: AffineTransform) -> AffineTransform;
}

impl<F> TransformConstraint for F
where
    F: Fn(AffineTransform) -> AffineTransform,
{
    fn constrain(&self, candidate: AffineTransform) -> AffineTransform {
        self(candidate)
    }
}

/// Identity constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconstrained;

impl TransformConstraint for Unconstrained {
    fn constrain(&self, candidate: AffineTransform) -> AffineTransform {
        candidate
    }
}

/// Keeps transformed content covering the container.
///
/// Per axis: content narrower than the container is centered, wider content
/// is shifted so that no gap opens at either edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainViewport {
    pub viewport: Viewport,
}

impl ContainViewport {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }
}

impl TransformConstraint for ContainViewport {
    fn constrain(&self, candidate: AffineTransform) -> AffineTransform {
        contain_viewport(candidate, self.viewport)
    }
}

/// Free-function form of [`ContainViewport`].
///
/// Zero-size containers leave the transform untouched.
#[must_use]
pub fn contain_viewport(transform: AffineTransform, viewport: Viewport) -> AffineTransform {
    if !viewport.is_valid() || !transform.is_valid() {
        return transform;
    }

    let dx = containment_shift(
        transform.invert_x(0.0),
        transform.invert_x(viewport.width) - viewport.width,
    );
    let dy = containment_shift(
        transform.invert_y(0.0),
        transform.invert_y(viewport.height) - viewport.height,
    );

    // Shifts are in content units; convert back to pixels.
    transform.translated_by(dx * transform.scale(), dy * transform.scale())
}

fn containment_shift(leading_gap: f64, trailing_gap: f64) -> f64 {
    if trailing_gap > leading_gap {
        return (leading_gap + trailing_gap) / 2.0;
    }
    let leading = leading_gap.min(0.0);
    if leading != 0.0 {
        leading
    } else {
        trailing_gap.max(0.0)
    }
}
