use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Point, Viewport, has_zero_area, point_in_polygon};

use super::GestureState;
use super::drag::{DEFAULT_DRAG_THRESHOLD_PX, DragRelease, DragTracker};

/// Default Manhattan distance a pointer must travel before a new vertex is recorded.
pub const DEFAULT_MIN_POINT_DISTANCE_PX: f64 = 6.0;

/// Inset applied when clamping vertices into the container.
const CLAMP_INSET_PX: f64 = 1.0;

fn default_min_point_distance() -> f64 {
    DEFAULT_MIN_POINT_DISTANCE_PX
}

fn default_true() -> bool {
    true
}

/// Host-configurable lasso options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LassoBehavior {
    #[serde(default = "default_min_point_distance")]
    pub min_point_distance_px: f64,
    /// Keeps vertices one pixel inside the container when its size is known.
    #[serde(default = "default_true")]
    pub clamp_to_viewport: bool,
}

impl Default for LassoBehavior {
    fn default() -> Self {
        Self {
            min_point_distance_px: DEFAULT_MIN_POINT_DISTANCE_PX,
            clamp_to_viewport: true,
        }
    }
}

/// Pixel-space lasso outline, implicitly closed (last vertex joins the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LassoPath {
    points: Vec<Point>,
}

impl LassoPath {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of vertices that differ from every earlier vertex.
    #[must_use]
    pub fn distinct_count(&self) -> usize {
        self.points
            .iter()
            .enumerate()
            .filter(|(index, point)| !self.points[..*index].contains(point))
            .count()
    }

    /// Fewer than three distinct vertices or no enclosed area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.distinct_count() < 3 || has_zero_area(&self.points)
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.points)
    }

    /// SVG path data (`M x y L x y ...`), open; renderers close it with `Z` or fill.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut path = String::with_capacity(self.points.len() * 16);
        for (index, point) in self.points.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            if index > 0 {
                path.push(' ');
            }
            let _ = write!(path, "{command} {} {}", point.x, point.y);
        }
        path
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

/// Result of a finished lasso pointer sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LassoOutcome {
    /// A closed polygon was drawn.
    Completed(LassoPath),
    /// A click or a degenerate outline: by convention, clear the selection.
    Cleared,
}

impl LassoOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&LassoPath> {
        match self {
            Self::Completed(path) => Some(path),
            Self::Cleared => None,
        }
    }
}

/// Freeform polygon selection state machine.
///
/// `idle --down--> drawing --move*--> drawing --up--> idle`. The finished path
/// stays readable through [`LassoSelector::path`] until the next gesture
/// starts or [`LassoSelector::reset`] is called.
#[derive(Debug, Clone)]
pub struct LassoSelector {
    behavior: LassoBehavior,
    enabled: bool,
    viewport: Option<Viewport>,
    drag: DragTracker,
    path: Option<LassoPath>,
}

impl Default for LassoSelector {
    fn default() -> Self {
        Self::new(LassoBehavior::default())
    }
}

impl LassoSelector {
    #[must_use]
    pub fn new(behavior: LassoBehavior) -> Self {
        Self {
            behavior,
            enabled: true,
            viewport: None,
            drag: DragTracker::new(DEFAULT_DRAG_THRESHOLD_PX),
            path: None,
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    #[must_use]
    pub fn with_drag_threshold_px(mut self, threshold_px: f64) -> Self {
        self.drag.set_threshold_px(threshold_px);
        self
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn set_drag_threshold_px(&mut self, threshold_px: f64) {
        self.drag.set_threshold_px(threshold_px);
    }

    #[must_use]
    pub fn behavior(&self) -> LassoBehavior {
        self.behavior
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling blocks new gestures and aborts one in progress.
    ///
    /// A path finished before the call stays available.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.drag.is_active() {
            self.cancel();
        }
        self.enabled = enabled;
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.drag.phase().into()
    }

    /// The in-progress or most recently finished path.
    #[must_use]
    pub fn path(&self) -> Option<&LassoPath> {
        self.path.as_ref()
    }

    pub fn reset(&mut self) {
        self.drag.cancel();
        self.path = None;
    }

    /// Aborts an in-progress gesture, discarding its partial path.
    pub fn cancel(&mut self) {
        if self.drag.is_active() {
            debug!("lasso aborted");
            self.drag.cancel();
            self.path = None;
        }
    }

    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        if !self.enabled || self.drag.is_active() || !point.is_finite() {
            return false;
        }
        self.path = None;
        self.drag.press(point);
        debug!(x = point.x, y = point.y, "lasso pressed");
        true
    }

    /// Returns `true` when the visible path changed.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        if !self.enabled || !point.is_finite() {
            return false;
        }
        let Some(step) = self.drag.move_to(point) else {
            return false;
        };

        if step.is_first {
            let anchor = self.clamp(step.anchor);
            let current = self.clamp(step.current);
            self.path = Some(LassoPath::new(vec![anchor, current]));
            trace!("lasso drawing started");
            return true;
        }
        self.extend(point)
    }

    /// Finishes the gesture. `None` when no lasso gesture was in progress.
    pub fn on_pointer_up(&mut self, point: Point) -> Option<LassoOutcome> {
        match self.drag.release(point) {
            DragRelease::Ignored => None,
            DragRelease::Click(_) => {
                debug!("lasso click clears selection");
                self.path = None;
                Some(LassoOutcome::Cleared)
            }
            DragRelease::DragEnd { .. } => {
                if point.is_finite() {
                    self.extend(point);
                }
                Some(self.finalize())
            }
        }
    }

    /// Pointer left the element mid-gesture: finish with what was drawn.
    pub fn on_pointer_leave(&mut self) -> Option<LassoOutcome> {
        if !self.drag.is_dragging() {
            self.cancel();
            return None;
        }
        self.drag.cancel();
        Some(self.finalize())
    }

    fn finalize(&mut self) -> LassoOutcome {
        match self.path.take() {
            Some(path) if !path.is_degenerate() => {
                debug!(vertices = path.len(), "lasso completed");
                self.path = Some(path.clone());
                LassoOutcome::Completed(path)
            }
            _ => {
                debug!("degenerate lasso reported as clear");
                LassoOutcome::Cleared
            }
        }
    }

    fn extend(&mut self, point: Point) -> bool {
        let min_distance = self.behavior.min_point_distance_px;
        let candidate = self.clamp(point);
        let Some(path) = self.path.as_mut() else {
            return false;
        };
        let far_enough = path
            .last()
            .is_none_or(|last| last.manhattan_distance(candidate) > min_distance);
        if far_enough {
            path.push(candidate);
        }
        far_enough
    }

    fn clamp(&self, point: Point) -> Point {
        match self.viewport {
            Some(viewport) if self.behavior.clamp_to_viewport && viewport.is_valid() => {
                viewport.clamp_inset(point, CLAMP_INSET_PX)
            }
            _ => point,
        }
    }
}
