use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AffineTransform, Direction, Point, TransformConstraint, Unconstrained};

use super::GestureState;
use super::drag::{DEFAULT_DRAG_THRESHOLD_PX, DragRelease, DragTracker};

/// Host-configurable pan options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PanBehavior {
    /// Axes a drag translates.
    #[serde(default)]
    pub axis: Direction,
    /// Applies the viewport containment constraint instead of the identity.
    #[serde(default)]
    pub constrain_to_viewport: bool,
}

/// How a pan pointer sequence ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanRelease {
    /// Pointer went up without dragging.
    Click(Point),
    /// A drag finished; the last emitted transform stands.
    Finished,
    /// No pan gesture was in progress.
    Ignored,
}

/// Drag-to-translate state machine.
///
/// Every move rebuilds the candidate from the transform captured at
/// pointer-down plus the total pointer offset, so emitted transforms do not
/// accumulate rounding drift.
pub struct PanController {
    axis: Direction,
    enabled: bool,
    constraint: Box<dyn TransformConstraint>,
    drag: DragTracker,
    start_transform: AffineTransform,
}

impl fmt::Debug for PanController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanController")
            .field("axis", &self.axis)
            .field("enabled", &self.enabled)
            .field("drag", &self.drag)
            .field("start_transform", &self.start_transform)
            .finish_non_exhaustive()
    }
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(Direction::XY)
    }
}

impl PanController {
    #[must_use]
    pub fn new(axis: Direction) -> Self {
        Self {
            axis,
            enabled: true,
            constraint: Box::new(Unconstrained),
            drag: DragTracker::new(DEFAULT_DRAG_THRESHOLD_PX),
            start_transform: AffineTransform::identity(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl TransformConstraint + 'static) -> Self {
        self.constraint = Box::new(constraint);
        self
    }

    #[must_use]
    pub fn with_drag_threshold_px(mut self, threshold_px: f64) -> Self {
        self.drag.set_threshold_px(threshold_px);
        self
    }

    pub fn set_constraint(&mut self, constraint: impl TransformConstraint + 'static) {
        self.constraint = Box::new(constraint);
    }

    pub fn set_drag_threshold_px(&mut self, threshold_px: f64) {
        self.drag.set_threshold_px(threshold_px);
    }

    #[must_use]
    pub fn axis(&self) -> Direction {
        self.axis
    }

    pub fn set_axis(&mut self, axis: Direction) {
        self.axis = axis;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling mid-gesture aborts to idle without emitting anything.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.drag.is_active() {
            debug!("pan aborted by disable");
            self.drag.cancel();
        }
        self.enabled = enabled;
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.drag.phase().into()
    }

    /// Starts a gesture. Returns `false` when disabled or already active.
    pub fn on_pointer_down(&mut self, point: Point, current: AffineTransform) -> bool {
        if !self.enabled || self.drag.is_active() || !point.is_finite() {
            return false;
        }
        self.drag.press(point);
        self.start_transform = current;
        debug!(x = point.x, y = point.y, "pan pressed");
        true
    }

    /// Returns the constrained transform to store, if this move produced one.
    pub fn on_pointer_move(&mut self, point: Point) -> Option<AffineTransform> {
        if !self.enabled || !point.is_finite() {
            return None;
        }
        let step = self.drag.move_to(point)?;
        let (dx, dy) = step.total_delta();
        let candidate = self.start_transform.translated_by(
            if self.axis.affects_x() { dx } else { 0.0 },
            if self.axis.affects_y() { dy } else { 0.0 },
        );
        let constrained = self.constraint.constrain(candidate);
        if !constrained.is_valid() {
            trace!(?constrained, "pan constraint produced invalid transform; dropped");
            return None;
        }
        trace!(dx, dy, tx = constrained.tx(), ty = constrained.ty(), "pan move");
        Some(constrained)
    }

    /// Ends the gesture; never emits a transform.
    pub fn on_pointer_up(&mut self, point: Point) -> PanRelease {
        match self.drag.release(point) {
            DragRelease::Click(at) => {
                debug!("pan released as click");
                PanRelease::Click(at)
            }
            DragRelease::DragEnd { .. } => {
                debug!("pan finished");
                PanRelease::Finished
            }
            DragRelease::Ignored => PanRelease::Ignored,
        }
    }

    /// Pointer left the element: same as release, without click reporting.
    pub fn on_pointer_leave(&mut self) -> bool {
        let was_active = self.drag.is_active();
        self.drag.cancel();
        was_active
    }

    /// Adopts a transform stored from outside the gesture, keeping the drag
    /// alive from the current pointer position.
    pub fn rebase(&mut self, current: AffineTransform) {
        if !self.drag.is_active() {
            return;
        }
        self.start_transform = current;
        self.drag.rebase();
        trace!(scale = current.scale(), "pan rebased");
    }

    /// Aborts any gesture in progress.
    pub fn cancel(&mut self) {
        self.drag.cancel();
    }
}
