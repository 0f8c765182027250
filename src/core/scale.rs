use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::transform::AffineTransform;
use crate::core::types::ScaleAxis;
use crate::error::{ChartError, ChartResult};

/// Linear domain -> range map that ignores the view transform.
///
/// A zero-width domain maps every value to the range midpoint instead of
/// dividing by zero; a zero-width range inverts to the domain midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Builds a scale whose domain is the finite extent of `values`.
    ///
    /// `NaN`/`±Infinity` samples are skipped; returns `None` when no finite
    /// sample exists.
    pub fn from_values<I>(values: I, range: (f64, f64)) -> ChartResult<Option<Self>>
    where
        I: IntoIterator<Item = f64>,
    {
        match finite_extent(values) {
            Some(domain) => Self::new(domain, range).map(Some),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_end == self.domain_start
    }

    /// Maps a domain value to the range.
    ///
    /// Non-finite input yields a non-finite position, which renderers treat as
    /// "no position".
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let domain_span = self.domain_end - self.domain_start;
        if domain_span == 0.0 {
            return (self.range_start + self.range_end) / 2.0;
        }
        let normalized = (value - self.domain_start) / domain_span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 || self.is_degenerate() {
            return (self.domain_start + self.domain_end) / 2.0;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Rebuilds the scale for a resized container.
    pub fn rescale_range(self, range: (f64, f64)) -> ChartResult<Self> {
        Self::new(self.domain(), range)
    }

    /// Rebuilds the scale for new data bounds.
    pub fn rescale_domain(self, domain: (f64, f64)) -> ChartResult<Self> {
        Self::new(domain, self.range())
    }
}

/// Returns `(min, max)` over the finite samples of `values`.
#[must_use]
pub fn finite_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Base scale post-composed with one axis of an [`AffineTransform`].
///
/// Forward: `base.map(v) * s + t[axis]`. Inverse is the exact algebraic inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComposedScale {
    base: LinearScale,
    transform: AffineTransform,
    axis: ScaleAxis,
}

impl ComposedScale {
    #[must_use]
    pub fn base(self) -> LinearScale {
        self.base
    }

    #[must_use]
    pub fn transform(self) -> AffineTransform {
        self.transform
    }

    #[must_use]
    pub fn axis(self) -> ScaleAxis {
        self.axis
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        self.transform.apply_axis(self.base.map(value), self.axis)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.base.invert(self.transform.invert_axis(pixel, self.axis))
    }

    /// Data interval currently visible across the base range.
    #[must_use]
    pub fn visible_domain(self) -> (f64, f64) {
        let (range_start, range_end) = self.base.range();
        (self.invert(range_start), self.invert(range_end))
    }
}

/// Composes `base` with the axis component of `transform`.
#[must_use]
pub fn compose(base: LinearScale, transform: AffineTransform, axis: ScaleAxis) -> ComposedScale {
    ComposedScale {
        base,
        transform,
        axis,
    }
}

/// Base and composed scale for one axis, as consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePair {
    pub base: LinearScale,
    pub composed: ComposedScale,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ComposerKey {
    domain: (f64, f64),
    range: (f64, f64),
    transform: AffineTransform,
    axis: ScaleAxis,
}

/// Memoizing scale builder for one chart axis.
///
/// The cached pair is reused only while domain, range, transform and axis are
/// unchanged; any difference rebuilds it.
#[derive(Debug, Clone, Default)]
pub struct ScaleComposer {
    cached: Option<(ComposerKey, ScalePair)>,
}

impl ScaleComposer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compose(
        &mut self,
        domain: (f64, f64),
        range: (f64, f64),
        transform: AffineTransform,
        axis: ScaleAxis,
    ) -> ChartResult<ScalePair> {
        let key = ComposerKey {
            domain,
            range,
            transform,
            axis,
        };
        if let Some((cached_key, pair)) = self.cached
            && cached_key == key
        {
            return Ok(pair);
        }

        let base = LinearScale::new(domain, range)?;
        let pair = ScalePair {
            base,
            composed: compose(base, transform, axis),
        };
        trace!(?axis, ?domain, ?range, scale = transform.scale(), "rebuilt composed scale");
        self.cached = Some((key, pair));
        Ok(pair)
    }

    /// Last composed pair, if any.
    #[must_use]
    pub fn cached(&self) -> Option<ScalePair> {
        self.cached.map(|(_, pair)| pair)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
