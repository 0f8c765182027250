//! Press/drag/release discrimination shared by every drag-driven controller.
//!
//! A press only becomes a drag once the pointer leaves a square of
//! `threshold_px` around the press position; a release before that is a click.

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Default click-vs-drag distance in pixels.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// One pointer movement accepted as part of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub anchor: Point,
    pub previous: Point,
    pub current: Point,
    pub is_first: bool,
}

impl DragMove {
    /// Offset from the press position.
    #[must_use]
    pub fn total_delta(self) -> (f64, f64) {
        (
            self.current.x - self.anchor.x,
            self.current.y - self.anchor.y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRelease {
    /// Released without crossing the threshold.
    Click(Point),
    /// Released after dragging.
    DragEnd { anchor: Point, current: Point },
    /// No press was in progress.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    phase: DragPhase,
    anchor: Point,
    last: Point,
    threshold_px: f64,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragTracker {
    #[must_use]
    pub fn new(threshold_px: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            anchor: Point::default(),
            last: Point::default(),
            threshold_px: sanitize_threshold(threshold_px),
        }
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.is_active().then_some(self.anchor)
    }

    #[must_use]
    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    pub fn set_threshold_px(&mut self, threshold_px: f64) {
        self.threshold_px = sanitize_threshold(threshold_px);
    }

    pub fn press(&mut self, point: Point) {
        self.phase = DragPhase::Pressed;
        self.anchor = point;
        self.last = point;
    }

    /// Feeds a pointer position; returns the move once the press is a drag.
    pub fn move_to(&mut self, point: Point) -> Option<DragMove> {
        let is_first = match self.phase {
            DragPhase::Idle => return None,
            DragPhase::Pressed => {
                let exceeded = (point.x - self.anchor.x).abs() > self.threshold_px
                    || (point.y - self.anchor.y).abs() > self.threshold_px;
                if !exceeded {
                    return None;
                }
                self.phase = DragPhase::Dragging;
                true
            }
            DragPhase::Dragging => false,
        };

        let step = DragMove {
            anchor: self.anchor,
            previous: self.last,
            current: point,
            is_first,
        };
        self.last = point;
        Some(step)
    }

    pub fn release(&mut self, point: Point) -> DragRelease {
        let release = match self.phase {
            DragPhase::Idle => DragRelease::Ignored,
            DragPhase::Pressed => DragRelease::Click(point),
            DragPhase::Dragging => DragRelease::DragEnd {
                anchor: self.anchor,
                current: point,
            },
        };
        self.phase = DragPhase::Idle;
        release
    }

    /// Moves the anchor of a running drag to the last accepted position, so
    /// later deltas are measured from there.
    pub fn rebase(&mut self) {
        if self.phase == DragPhase::Dragging {
            self.anchor = self.last;
        }
    }

    /// Drops any press or drag without reporting it.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

fn sanitize_threshold(threshold_px: f64) -> f64 {
    if threshold_px.is_finite() && threshold_px >= 0.0 {
        threshold_px
    } else {
        DEFAULT_DRAG_THRESHOLD_PX
    }
}

#[cfg(test)]
mod tests {
    use super::{DragPhase, DragRelease, DragTracker};
    use crate::core::Point;

    #[test]
    fn small_movement_stays_a_click() {
        let mut drag = DragTracker::new(4.0);
        drag.press(Point::new(10.0, 10.0));
        assert!(drag.move_to(Point::new(13.0, 6.0)).is_none());
        assert_eq!(drag.phase(), DragPhase::Pressed);
        assert_eq!(
            drag.release(Point::new(13.0, 6.0)),
            DragRelease::Click(Point::new(13.0, 6.0))
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn crossing_threshold_starts_drag_once() {
        let mut drag = DragTracker::new(4.0);
        drag.press(Point::new(0.0, 0.0));
        let first = drag.move_to(Point::new(5.0, 0.0)).expect("first move");
        assert!(first.is_first);
        let second = drag.move_to(Point::new(8.0, 1.0)).expect("second move");
        assert!(!second.is_first);
        assert_eq!(second.previous, Point::new(5.0, 0.0));
        assert_eq!(second.total_delta(), (8.0, 1.0));
    }

    #[test]
    fn rebase_measures_from_last_position() {
        let mut drag = DragTracker::new(4.0);
        drag.press(Point::new(0.0, 0.0));
        drag.move_to(Point::new(10.0, 0.0)).expect("drag");
        drag.rebase();
        let step = drag.move_to(Point::new(12.0, 3.0)).expect("move");
        assert_eq!(step.anchor, Point::new(10.0, 0.0));
        assert_eq!(step.total_delta(), (2.0, 3.0));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut drag = DragTracker::default();
        assert!(drag.move_to(Point::new(50.0, 50.0)).is_none());
        assert_eq!(drag.release(Point::new(0.0, 0.0)), DragRelease::Ignored);
    }

    #[test]
    fn invalid_threshold_falls_back_to_default() {
        let drag = DragTracker::new(f64::NAN);
        assert_eq!(drag.threshold_px(), super::DEFAULT_DRAG_THRESHOLD_PX);
    }
}
