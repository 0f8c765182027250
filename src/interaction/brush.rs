use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{BrushRect, Direction, Point, Viewport, point_in_rect};

use super::GestureState;
use super::drag::{DEFAULT_DRAG_THRESHOLD_PX, DragRelease, DragTracker};

pub const DEFAULT_MIN_BRUSH_SIZE_PX: f64 = 8.0;
pub const DEFAULT_HANDLE_WIDTH_PX: f64 = 6.0;

/// Brush lifetime after pointer release.
///
/// Only these two modes exist; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// The rectangle survives release and stays editable.
    #[default]
    Keep,
    /// The rectangle is reported on release and then discarded.
    ClearOnMouseUp,
}

fn default_min_size() -> f64 {
    DEFAULT_MIN_BRUSH_SIZE_PX
}

fn default_handle_width() -> f64 {
    DEFAULT_HANDLE_WIDTH_PX
}

/// Host-configurable brush options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushBehavior {
    #[serde(default)]
    pub persist_mode: PersistMode,
    /// `X` brushes span the full container height, `Y` the full width.
    #[serde(default)]
    pub axis: Direction,
    #[serde(default = "default_min_size")]
    pub min_size_px: f64,
    #[serde(default = "default_handle_width")]
    pub handle_width_px: f64,
}

impl Default for BrushBehavior {
    fn default() -> Self {
        Self {
            persist_mode: PersistMode::Keep,
            axis: Direction::XY,
            min_size_px: DEFAULT_MIN_BRUSH_SIZE_PX,
            handle_width_px: DEFAULT_HANDLE_WIDTH_PX,
        }
    }
}

/// Part of an existing rectangle a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushHandle {
    Body,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl BrushHandle {
    const fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    const fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    const fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    const fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::NorthWest | Self::SouthEast | Self::SouthWest
        )
    }
}

/// Result of a finished brush pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushOutcome {
    Finished(BrushRect),
    /// A click: the rectangle was removed.
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BrushEdit {
    Create,
    Move { origin: BrushRect },
    Resize { origin: BrushRect, handle: BrushHandle },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveEdit {
    edit: BrushEdit,
    before: Option<BrushRect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Bounds {
    fn from_viewport(viewport: Option<Viewport>) -> Self {
        match viewport {
            Some(viewport) if viewport.is_valid() => Self {
                x0: 0.0,
                y0: 0.0,
                x1: viewport.width,
                y1: viewport.height,
            },
            _ => Self {
                x0: f64::NEG_INFINITY,
                y0: f64::NEG_INFINITY,
                x1: f64::INFINITY,
                y1: f64::INFINITY,
            },
        }
    }

    fn is_finite(self) -> bool {
        self.x1.is_finite() && self.y1.is_finite()
    }

    fn clamp_rect(self, rect: BrushRect) -> BrushRect {
        BrushRect {
            x0: clamp_between(rect.x0, self.x0, self.x1),
            y0: clamp_between(rect.y0, self.y0, self.y1),
            x1: clamp_between(rect.x1, self.x0, self.x1),
            y1: clamp_between(rect.y1, self.y0, self.y1),
        }
    }
}

/// Clamp that tolerates `min > max` (returns `max`) instead of panicking.
fn clamp_between(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Rectangular selection state machine with create/move/resize editing.
#[derive(Debug, Clone)]
pub struct BrushSelector {
    behavior: BrushBehavior,
    enabled: bool,
    viewport: Option<Viewport>,
    drag: DragTracker,
    rect: Option<BrushRect>,
    active: Option<ActiveEdit>,
}

impl Default for BrushSelector {
    fn default() -> Self {
        Self::new(BrushBehavior::default())
    }
}

impl BrushSelector {
    #[must_use]
    pub fn new(behavior: BrushBehavior) -> Self {
        Self {
            behavior,
            enabled: true,
            viewport: None,
            drag: DragTracker::new(DEFAULT_DRAG_THRESHOLD_PX),
            rect: None,
            active: None,
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
    pub fn behavior(&self) -> BrushBehavior {
        self.behavior
    }

    #[must_use]
    pub fn persist_mode(&self) -> PersistMode {
        self.behavior.persist_mode
    }

    /// Switching to `ClearOnMouseUp` drops a kept rectangle when idle.
    pub fn set_persist_mode(&mut self, mode: PersistMode) {
        self.behavior.persist_mode = mode;
        if mode == PersistMode::ClearOnMouseUp && !self.drag.is_active() {
            self.rect = None;
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.enabled = enabled;
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.drag.phase().into()
    }

    #[must_use]
    pub fn rect(&self) -> Option<BrushRect> {
        self.rect
    }

    /// Caller-driven replacement; the rectangle is normalized.
    pub fn set_rect(&mut self, rect: Option<BrushRect>) {
        self.rect = rect.map(|rect| {
            BrushRect::from_corners(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1))
        });
    }

    pub fn clear(&mut self) {
        self.drag.cancel();
        self.active = None;
        self.rect = None;
    }

    /// Aborts an edit in progress and restores the rectangle it started from.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            debug!("brush edit aborted");
            self.rect = active.before;
        }
        self.drag.cancel();
    }

    /// Which part of the current rectangle `point` would grab.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<BrushHandle> {
        let rect = self.rect?;
        let half = self.behavior.handle_width_px / 2.0;
        let axis = self.behavior.axis;
        let within_x = point.x >= rect.x0 && point.x <= rect.x1;
        let within_y = point.y >= rect.y0 && point.y <= rect.y1;

        let mut candidates: SmallVec<[(OrderedFloat<f64>, u8, BrushHandle); 4]> = SmallVec::new();
        let mut consider = |distance: f64, handle: BrushHandle| {
            if distance <= half {
                let rank = if handle.is_corner() { 0 } else { 1 };
                candidates.push((OrderedFloat(distance), rank, handle));
            }
        };

        if axis == Direction::XY {
            for (corner_x, corner_y, handle) in [
                (rect.x0, rect.y0, BrushHandle::NorthWest),
                (rect.x1, rect.y0, BrushHandle::NorthEast),
                (rect.x0, rect.y1, BrushHandle::SouthWest),
                (rect.x1, rect.y1, BrushHandle::SouthEast),
            ] {
                consider(
                    (point.x - corner_x).abs().max((point.y - corner_y).abs()),
                    handle,
                );
            }
        }
        if axis.affects_y() && within_x {
            consider((point.y - rect.y0).abs(), BrushHandle::North);
            consider((point.y - rect.y1).abs(), BrushHandle::South);
        }
        if axis.affects_x() && within_y {
            consider((point.x - rect.x0).abs(), BrushHandle::West);
            consider((point.x - rect.x1).abs(), BrushHandle::East);
        }

        candidates
            .into_iter()
            .min_by_key(|(distance, rank, _)| (*distance, *rank))
            .map(|(_, _, handle)| handle)
            .or_else(|| point_in_rect(point, &rect).then_some(BrushHandle::Body))
    }

    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        if !self.enabled || self.drag.is_active() || !point.is_finite() {
            return false;
        }

        let edit = match (self.behavior.persist_mode, self.rect, self.hit_test(point)) {
            (PersistMode::Keep, Some(origin), Some(BrushHandle::Body)) => {
                BrushEdit::Move { origin }
            }
            (PersistMode::Keep, Some(origin), Some(handle)) => BrushEdit::Resize { origin, handle },
            _ => BrushEdit::Create,
        };
        debug!(?edit, x = point.x, y = point.y, "brush pressed");
        self.active = Some(ActiveEdit {
            edit,
            before: self.rect,
        });
        self.drag.press(point);
        true
    }

    /// Returns the updated rectangle when this move changed it.
    pub fn on_pointer_move(&mut self, point: Point) -> Option<BrushRect> {
        if !self.enabled || !point.is_finite() {
            return None;
        }
        let step = self.drag.move_to(point)?;
        self.apply(step.anchor, step.current)
    }

    /// Finishes the gesture. `None` when no brush gesture was in progress.
    pub fn on_pointer_up(&mut self, point: Point) -> Option<BrushOutcome> {
        match self.drag.release(point) {
            DragRelease::Ignored => None,
            DragRelease::Click(_) => {
                debug!("brush click clears rectangle");
                self.active = None;
                self.rect = None;
                Some(BrushOutcome::Cleared)
            }
            DragRelease::DragEnd { anchor, current } => {
                if current.is_finite() {
                    self.apply(anchor, current);
                }
                Some(self.finish())
            }
        }
    }

    /// Pointer left the element: a drag finishes with the current rectangle,
    /// a pending press is dropped.
    pub fn on_pointer_leave(&mut self) -> Option<BrushOutcome> {
        if !self.drag.is_dragging() {
            self.cancel();
            return None;
        }
        self.drag.cancel();
        Some(self.finish())
    }

    fn finish(&mut self) -> BrushOutcome {
        self.active = None;
        let outcome = match self.rect {
            Some(rect) => BrushOutcome::Finished(rect),
            None => BrushOutcome::Cleared,
        };
        if self.behavior.persist_mode == PersistMode::ClearOnMouseUp {
            self.rect = None;
        }
        debug!(?outcome, "brush finished");
        outcome
    }

    fn apply(&mut self, anchor: Point, current: Point) -> Option<BrushRect> {
        let active = self.active?;
        let bounds = Bounds::from_viewport(self.viewport);
        let next = match active.edit {
            BrushEdit::Create => self.create_rect(anchor, current, bounds),
            BrushEdit::Move { origin } => {
                move_rect(origin, current.x - anchor.x, current.y - anchor.y, bounds)
            }
            BrushEdit::Resize { origin, handle } => {
                resize_rect(origin, handle, current, bounds, self.behavior.min_size_px)
            }
        };

        if self.rect == Some(next) {
            return None;
        }
        trace!(x0 = next.x0, y0 = next.y0, x1 = next.x1, y1 = next.y1, "brush changed");
        self.rect = Some(next);
        Some(next)
    }

    fn create_rect(&self, anchor: Point, current: Point, bounds: Bounds) -> BrushRect {
        let mut rect = BrushRect::from_corners(anchor, current);
        if bounds.is_finite() {
            match self.behavior.axis {
                Direction::X => {
                    rect.y0 = bounds.y0;
                    rect.y1 = bounds.y1;
                }
                Direction::Y => {
                    rect.x0 = bounds.x0;
                    rect.x1 = bounds.x1;
                }
                Direction::XY => {}
            }
        }
        bounds.clamp_rect(rect)
    }
}

fn move_rect(origin: BrushRect, dx: f64, dy: f64, bounds: Bounds) -> BrushRect {
    let width = origin.width();
    let height = origin.height();
    let x0 = clamp_between(origin.x0 + dx, bounds.x0, bounds.x1 - width);
    let y0 = clamp_between(origin.y0 + dy, bounds.y0, bounds.y1 - height);
    BrushRect {
        x0,
        y0,
        x1: x0 + width,
        y1: y0 + height,
    }
}

fn resize_rect(
    origin: BrushRect,
    handle: BrushHandle,
    pointer: Point,
    bounds: Bounds,
    min_size: f64,
) -> BrushRect {
    let mut rect = origin;
    if handle.moves_west() {
        rect.x0 = clamp_between(pointer.x, bounds.x0, origin.x1 - min_size);
    }
    if handle.moves_east() {
        rect.x1 = clamp_between(pointer.x, origin.x0 + min_size, bounds.x1);
    }
    if handle.moves_north() {
        rect.y0 = clamp_between(pointer.y, bounds.y0, origin.y1 - min_size);
    }
    if handle.moves_south() {
        rect.y1 = clamp_between(pointer.y, origin.y0 + min_size, bounds.y1);
    }
    rect
}
