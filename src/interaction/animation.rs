use serde::{Deserialize, Serialize};

use crate::core::AffineTransform;

pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 1_000.0;

/// One frame of an animated transform change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSample {
    pub transform: AffineTransform,
    pub finished: bool,
}

/// Cosine-eased interpolation between two transforms, sampled from frame timestamps.
///
/// Timestamps are whatever monotonic milliseconds the host's frame callback
/// delivers; the animation never reads a clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformAnimation {
    start: AffineTransform,
    end: AffineTransform,
    started_at_ms: f64,
    duration_ms: f64,
}

impl TransformAnimation {
    #[must_use]
    pub fn new(
        start: AffineTransform,
        end: AffineTransform,
        started_at_ms: f64,
        duration_ms: f64,
    ) -> Self {
        let duration_ms = if duration_ms.is_finite() && duration_ms > 0.0 {
            duration_ms
        } else {
            DEFAULT_ANIMATION_DURATION_MS
        };
        Self {
            start,
            end,
            started_at_ms,
            duration_ms,
        }
    }

    #[must_use]
    pub fn end(&self) -> AffineTransform {
        self.end
    }

    /// Samples the animation; once elapsed time reaches the duration the
    /// sample is exactly `end`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> AnimationSample {
        let t = (now_ms - self.started_at_ms) / self.duration_ms;
        if !t.is_finite() || t >= 1.0 {
            return AnimationSample {
                transform: self.end,
                finished: true,
            };
        }
        let t = t.max(0.0);
        let eased = (1.0 - (t * std::f64::consts::PI).cos()) / 2.0;
        let lerp = |from: f64, to: f64| from * (1.0 - eased) + to * eased;

        // Both endpoints have scale > 0, so a convex blend does too.
        let transform = AffineTransform::new(
            lerp(self.start.scale(), self.end.scale()),
            lerp(self.start.tx(), self.end.tx()),
            lerp(self.start.ty(), self.end.ty()),
        )
        .unwrap_or(self.end);
        AnimationSample {
            transform,
            finished: false,
        }
    }
}
