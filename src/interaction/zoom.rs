use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AffineTransform, Point, TransformConstraint, Unconstrained, Viewport, ZoomExtent};
use crate::error::{ChartError, ChartResult};

use super::GestureState;
use super::wheel::WheelInput;

/// Default exponent applied per wheel notch: `factor = exp(notches * step)`.
pub const DEFAULT_WHEEL_STEP: f64 = 0.1;

fn default_wheel_step() -> f64 {
    DEFAULT_WHEEL_STEP
}

/// Host-configurable zoom options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    #[serde(default)]
    pub extent: ZoomExtent,
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
    #[serde(default)]
    pub constrain_to_viewport: bool,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            extent: ZoomExtent::default(),
            wheel_step: DEFAULT_WHEEL_STEP,
            constrain_to_viewport: false,
        }
    }
}

/// Rescales `current` by `factor`, clamped to `extent`, keeping the content
/// under `anchor` fixed.
#[must_use]
pub fn zoom_transform(
    current: AffineTransform,
    factor: f64,
    anchor: Point,
    extent: ZoomExtent,
) -> AffineTransform {
    let new_scale = extent.clamp(current.scale() * factor);
    current.rescaled_around(new_scale, anchor)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchGesture {
    start_transform: AffineTransform,
}

/// Wheel/pinch-to-scale state machine.
///
/// Wheel input is handled per event. Pinch reuses a press/update/release
/// lifecycle and rescales the transform captured when the pinch started.
pub struct ZoomController {
    extent: ZoomExtent,
    wheel_step: f64,
    enabled: bool,
    viewport: Option<Viewport>,
    constraint: Box<dyn TransformConstraint>,
    pinch: Option<PinchGesture>,
}

impl fmt::Debug for ZoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomController")
            .field("extent", &self.extent)
            .field("wheel_step", &self.wheel_step)
            .field("enabled", &self.enabled)
            .field("viewport", &self.viewport)
            .field("pinch", &self.pinch)
            .finish_non_exhaustive()
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomExtent::default())
    }
}

impl ZoomController {
    #[must_use]
    pub fn new(extent: ZoomExtent) -> Self {
        Self {
            extent,
            wheel_step: DEFAULT_WHEEL_STEP,
            enabled: true,
            viewport: None,
            constraint: Box::new(Unconstrained),
            pinch: None,
        }
    }

    /// Validates and builds a controller from serialized behavior.
    pub fn from_behavior(behavior: ZoomBehavior) -> ChartResult<Self> {
        let extent = behavior.extent.validate()?;
        let mut controller = Self::new(extent);
        controller.set_wheel_step(behavior.wheel_step)?;
        Ok(controller)
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl TransformConstraint + 'static) -> Self {
        self.constraint = Box::new(constraint);
        self
    }

    pub fn set_constraint(&mut self, constraint: impl TransformConstraint + 'static) {
        self.constraint = Box::new(constraint);
    }

    /// Wheel events positioned outside this container are ignored.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn extent(&self) -> ZoomExtent {
        self.extent
    }

    pub fn set_extent(&mut self, extent: ZoomExtent) -> ChartResult<()> {
        self.extent = extent.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn wheel_step(&self) -> f64 {
        self.wheel_step
    }

    pub fn set_wheel_step(&mut self, wheel_step: f64) -> ChartResult<()> {
        if !wheel_step.is_finite() || wheel_step <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom wheel step must be finite and > 0".to_owned(),
            ));
        }
        self.wheel_step = wheel_step;
        Ok(())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling mid-pinch aborts without emitting.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.pinch.take().is_some() {
            debug!("pinch zoom aborted by disable");
        }
        self.enabled = enabled;
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        if self.pinch.is_some() {
            GestureState::Active
        } else {
            GestureState::Idle
        }
    }

    /// Explicit zoom by a multiplicative factor around `anchor`.
    ///
    /// Returns `Ok(None)` when disabled or when clamping leaves the transform unchanged.
    pub fn zoom_by(
        &self,
        current: AffineTransform,
        factor: f64,
        anchor: Point,
    ) -> ChartResult<Option<AffineTransform>> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        if !self.enabled {
            return Ok(None);
        }
        Ok(self.propose(current, factor, anchor))
    }

    /// Handles one wheel event.
    pub fn on_wheel(&self, wheel: WheelInput, current: AffineTransform) -> Option<AffineTransform> {
        if !self.enabled {
            return None;
        }
        let normalized = wheel.normalize();
        if !normalized.position.is_finite() {
            return None;
        }
        if let Some(viewport) = self.viewport
            && !viewport.contains(normalized.position)
        {
            trace!(x = normalized.position.x, y = normalized.position.y, "wheel outside viewport");
            return None;
        }

        let notches = -normalized.spin_y;
        if notches == 0.0 {
            return None;
        }
        let factor = (notches * self.wheel_step).exp();
        self.propose(current, factor, normalized.position)
    }

    /// Starts a pinch. Returns `false` when disabled or already pinching.
    pub fn pinch_start(&mut self, current: AffineTransform) -> bool {
        if !self.enabled || self.pinch.is_some() {
            return false;
        }
        self.pinch = Some(PinchGesture {
            start_transform: current,
        });
        debug!(scale = current.scale(), "pinch started");
        true
    }

    /// Applies the cumulative pinch factor (relative to pinch start) around `center`.
    pub fn pinch_update(
        &mut self,
        cumulative_factor: f64,
        center: Point,
    ) -> Option<AffineTransform> {
        if !self.enabled {
            return None;
        }
        let pinch = self.pinch?;
        if !cumulative_factor.is_finite() || cumulative_factor <= 0.0 || !center.is_finite() {
            trace!(cumulative_factor, "ignoring degenerate pinch update");
            return None;
        }
        let candidate =
            zoom_transform(pinch.start_transform, cumulative_factor, center, self.extent);
        self.finish_candidate(candidate)
    }

    pub fn pinch_end(&mut self) -> bool {
        let was_active = self.pinch.take().is_some();
        if was_active {
            debug!("pinch ended");
        }
        was_active
    }

    pub fn cancel(&mut self) {
        self.pinch = None;
    }

    fn propose(
        &self,
        current: AffineTransform,
        factor: f64,
        anchor: Point,
    ) -> Option<AffineTransform> {
        let candidate = zoom_transform(current, factor, anchor, self.extent);
        if candidate == current {
            trace!(scale = current.scale(), "zoom clamped to no-op");
            return None;
        }
        self.finish_candidate(candidate)
    }

    fn finish_candidate(&self, candidate: AffineTransform) -> Option<AffineTransform> {
        let constrained = self.constraint.constrain(candidate);
        if !constrained.is_valid() {
            trace!(?constrained, "zoom constraint produced invalid transform; dropped");
            return None;
        }
        trace!(scale = constrained.scale(), tx = constrained.tx(), ty = constrained.ty(), "zoom");
        Some(constrained)
    }
}
