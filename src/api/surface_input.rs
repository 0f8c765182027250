use tracing::debug;

use crate::core::Point;
use crate::error::ChartResult;
use crate::extensions::SurfaceEvent;
use crate::interaction::{
    BrushOutcome, GestureState, InteractionMode, LassoOutcome, PanRelease, PersistMode,
    WheelInput,
};

use super::ChartSurface;

impl ChartSurface {
    /// Routes a press to the controller selected by the current mode.
    ///
    /// Returns `true` when a gesture started.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let started = match self.mode {
            InteractionMode::Pan => self.pan.on_pointer_down(point, self.transform),
            InteractionMode::Lasso => {
                let had_path = self.lasso.path().is_some();
                let started = self.lasso.on_pointer_down(point);
                if started && had_path {
                    self.emit_event(SurfaceEvent::LassoChanged { vertices: 0 });
                }
                started
            }
            InteractionMode::Brush => self.brush.on_pointer_down(point),
            InteractionMode::Zoom | InteractionMode::None => false,
        };
        if started {
            self.animation = None;
            if self.mode == InteractionMode::Pan {
                self.emit_event(SurfaceEvent::PanStarted);
            }
        }
        started
    }

    /// Returns `true` when the move changed the transform or a selection.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.mode {
            InteractionMode::Pan => match self.pan.on_pointer_move(point) {
                Some(transform) => {
                    self.commit_transform(transform);
                    true
                }
                None => false,
            },
            InteractionMode::Lasso => {
                if !self.lasso.on_pointer_move(point) {
                    return false;
                }
                let vertices = self.lasso.path().map_or(0, |path| path.len());
                self.emit_event(SurfaceEvent::LassoChanged { vertices });
                true
            }
            InteractionMode::Brush => match self.brush.on_pointer_move(point) {
                Some(rect) => {
                    self.emit_event(SurfaceEvent::BrushChanged { rect: Some(rect) });
                    true
                }
                None => false,
            },
            InteractionMode::Zoom | InteractionMode::None => false,
        }
    }

    /// Ends the gesture in progress. Returns `true` when one was active.
    pub fn pointer_up(&mut self, point: Point) -> bool {
        match self.mode {
            InteractionMode::Pan => match self.pan.on_pointer_up(point) {
                PanRelease::Click(at) => {
                    self.emit_event(SurfaceEvent::Clicked { point: at });
                    self.emit_event(SurfaceEvent::PanEnded);
                    true
                }
                PanRelease::Finished => {
                    self.emit_event(SurfaceEvent::PanEnded);
                    true
                }
                PanRelease::Ignored => false,
            },
            InteractionMode::Lasso => {
                let outcome = self.lasso.on_pointer_up(point);
                self.emit_lasso_outcome(outcome)
            }
            InteractionMode::Brush => {
                let outcome = self.brush.on_pointer_up(point);
                self.emit_brush_outcome(outcome)
            }
            InteractionMode::Zoom | InteractionMode::None => false,
        }
    }

    /// Pointer left the element. Drags finish with what was drawn; pending
    /// presses are dropped.
    pub fn pointer_leave(&mut self) -> bool {
        match self.mode {
            InteractionMode::Pan => {
                let was_active = self.pan.on_pointer_leave();
                if was_active {
                    self.emit_event(SurfaceEvent::PanEnded);
                }
                was_active
            }
            InteractionMode::Lasso => {
                let outcome = self.lasso.on_pointer_leave();
                self.emit_lasso_outcome(outcome)
            }
            InteractionMode::Brush => {
                let outcome = self.brush.on_pointer_leave();
                self.emit_brush_outcome(outcome)
            }
            InteractionMode::Zoom | InteractionMode::None => false,
        }
    }

    /// Wheel input zooms around the pointer in pan and zoom modes.
    ///
    /// Ignored while a pan drag is active. Returns `true` when the transform
    /// changed.
    pub fn wheel(&mut self, wheel: WheelInput) -> bool {
        if !self.mode.routes_wheel_to_zoom() || self.pan.state() == GestureState::Active {
            return false;
        }
        match self.zoom.on_wheel(wheel, self.transform) {
            Some(transform) => {
                self.animation = None;
                self.store_transform(transform);
                true
            }
            None => false,
        }
    }

    /// Programmatic zoom by `factor` around `anchor`, honoring the extent.
    ///
    /// Works in every mode; returns `Ok(false)` when clamping made it a no-op.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) -> ChartResult<bool> {
        let was_enabled = self.zoom.is_enabled();
        self.zoom.set_enabled(true);
        let result = self.zoom.zoom_by(self.transform, factor, anchor);
        self.zoom.set_enabled(was_enabled);
        match result? {
            Some(transform) => {
                self.animation = None;
                self.store_transform(transform);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn pinch_start(&mut self) -> bool {
        if !self.mode.routes_pinch_to_zoom() {
            return false;
        }
        let started = self.zoom.pinch_start(self.transform);
        if started {
            self.animation = None;
        }
        started
    }

    /// `cumulative_factor` is relative to the transform at pinch start.
    pub fn pinch_update(&mut self, cumulative_factor: f64, center: Point) -> bool {
        if !self.mode.routes_pinch_to_zoom() {
            return false;
        }
        match self.zoom.pinch_update(cumulative_factor, center) {
            Some(transform) => {
                self.store_transform(transform);
                true
            }
            None => false,
        }
    }

    pub fn pinch_end(&mut self) -> bool {
        self.zoom.pinch_end()
    }

    fn emit_lasso_outcome(&mut self, outcome: Option<LassoOutcome>) -> bool {
        let Some(outcome) = outcome else {
            return false;
        };
        let path = match outcome {
            LassoOutcome::Completed(path) => Some(path),
            LassoOutcome::Cleared => None,
        };
        debug!(completed = path.is_some(), "lasso gesture ended");
        self.emit_event(SurfaceEvent::LassoCompleted { path });
        true
    }

    fn emit_brush_outcome(&mut self, outcome: Option<BrushOutcome>) -> bool {
        let Some(outcome) = outcome else {
            return false;
        };
        let rect = match outcome {
            BrushOutcome::Finished(rect) => Some(rect),
            BrushOutcome::Cleared => None,
        };
        debug!(finished = rect.is_some(), "brush gesture ended");
        self.emit_event(SurfaceEvent::BrushCompleted { rect });
        if rect.is_some() && self.brush.persist_mode() == PersistMode::ClearOnMouseUp {
            self.emit_event(SurfaceEvent::BrushChanged { rect: None });
        }
        true
    }
}
