use indexmap::IndexMap;
use tracing::debug;

use crate::core::{AffineTransform, ContainViewport, ScaleComposer, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{SurfaceEvent, SurfaceObserver};
use crate::interaction::{
    BrushSelector, GestureState, InteractionMode, LassoSelector, PanController, TransformAnimation,
    ZoomController,
};

use super::SurfaceConfig;

/// Interaction engine for one chart surface.
///
/// Owns the single [`AffineTransform`] of the surface, the current
/// [`InteractionMode`] and one controller per gesture kind. Input is routed to
/// the controller the mode selects; the others stay disabled, so two
/// controllers can never act on the same pointer sequence.
pub struct ChartSurface {
    pub(super) config: SurfaceConfig,
    pub(super) transform: AffineTransform,
    pub(super) mode: InteractionMode,
    pub(super) pan: PanController,
    pub(super) zoom: ZoomController,
    pub(super) lasso: LassoSelector,
    pub(super) brush: BrushSelector,
    pub(super) x_composer: ScaleComposer,
    pub(super) y_composer: ScaleComposer,
    pub(super) animation: Option<TransformAnimation>,
    pub(super) observers: IndexMap<String, Box<dyn SurfaceObserver>>,
}

impl std::fmt::Debug for ChartSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSurface")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("mode", &self.mode)
            .field("pan", &self.pan)
            .field("zoom", &self.zoom)
            .field("lasso", &self.lasso)
            .field("brush", &self.brush)
            .field("animation", &self.animation)
            .field("observers", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ChartSurface {
    pub fn new(config: SurfaceConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let threshold = config.drag_threshold_px;

        let pan = PanController::new(config.pan.axis).with_drag_threshold_px(threshold);
        let zoom = ZoomController::from_behavior(config.zoom)?;
        let lasso = LassoSelector::new(config.lasso).with_drag_threshold_px(threshold);
        let brush = BrushSelector::new(config.brush).with_drag_threshold_px(threshold);

        let mut surface = Self {
            config,
            transform: AffineTransform::identity(),
            mode: config.mode,
            pan,
            zoom,
            lasso,
            brush,
            x_composer: ScaleComposer::new(),
            y_composer: ScaleComposer::new(),
            animation: None,
            observers: IndexMap::new(),
        };
        surface.apply_viewport(config.viewport);
        surface.apply_mode_gates();
        debug!(
            mode = ?surface.mode,
            width = config.viewport.width,
            height = config.viewport.height,
            "chart surface created"
        );
        Ok(surface)
    }

    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// `Active` while any controller is mid-gesture.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        let states = [
            self.pan.state(),
            self.zoom.state(),
            self.lasso.state(),
            self.brush.state(),
        ];
        if states.contains(&GestureState::Active) {
            GestureState::Active
        } else {
            GestureState::Idle
        }
    }

    /// Switches the interaction mode.
    ///
    /// Gestures of controllers the new mode does not select are aborted
    /// without emitting anything; finished selections are kept.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "interaction mode changed");
        self.mode = mode;
        self.config.mode = mode;
        self.apply_mode_gates();
        self.emit_event(SurfaceEvent::ModeChanged { mode });
    }

    /// Replaces the transform from outside a gesture (e.g. "reset view").
    pub fn set_transform(&mut self, transform: AffineTransform) -> ChartResult<()> {
        if !transform.is_valid() {
            return Err(ChartError::InvalidData(
                "transform requires finite components and scale > 0".to_owned(),
            ));
        }
        self.animation = None;
        self.store_transform(transform);
        Ok(())
    }

    pub fn reset_transform(&mut self) {
        self.animation = None;
        self.store_transform(AffineTransform::identity());
    }

    /// Resizes the container. The transform is left untouched.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        if viewport == self.config.viewport {
            return Ok(());
        }
        self.config.viewport = viewport;
        self.apply_viewport(viewport);
        self.emit_event(SurfaceEvent::ViewportResized { viewport });
        Ok(())
    }

    /// Starts an eased transition from the current transform to `target`.
    pub fn animate_to(
        &mut self,
        target: AffineTransform,
        now_ms: f64,
        duration_ms: f64,
    ) -> ChartResult<()> {
        if !target.is_valid() {
            return Err(ChartError::InvalidData(
                "animation target transform is invalid".to_owned(),
            ));
        }
        self.animation = Some(TransformAnimation::new(
            self.transform,
            target,
            now_ms,
            duration_ms,
        ));
        Ok(())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advances a running animation to `now_ms`. Returns `true` while more
    /// frames are needed.
    pub fn advance_animation(&mut self, now_ms: f64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let sample = animation.sample(now_ms);
        if sample.finished {
            self.animation = None;
        }
        self.store_transform(sample.transform);
        !sample.finished
    }

    /// Stores a transform produced outside the pan drag; a running pan keeps
    /// going from it instead of its press-time transform.
    pub(super) fn store_transform(&mut self, transform: AffineTransform) {
        self.pan.rebase(transform);
        self.commit_transform(transform);
    }

    pub(super) fn commit_transform(&mut self, transform: AffineTransform) {
        if transform == self.transform {
            return;
        }
        self.transform = transform;
        self.emit_event(SurfaceEvent::TransformChanged { transform });
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        let usable = viewport.is_valid().then_some(viewport);
        self.zoom.set_viewport(usable);
        self.lasso.set_viewport(usable);
        self.brush.set_viewport(usable);

        if self.config.pan.constrain_to_viewport {
            self.pan.set_constraint(ContainViewport::new(viewport));
        }
        if self.config.zoom.constrain_to_viewport {
            self.zoom.set_constraint(ContainViewport::new(viewport));
        }
    }

    fn apply_mode_gates(&mut self) {
        self.pan.set_enabled(self.mode.routes_drag_to_pan());
        self.zoom
            .set_enabled(self.mode.routes_wheel_to_zoom() || self.mode.routes_pinch_to_zoom());
        self.lasso.set_enabled(self.mode == InteractionMode::Lasso);
        self.brush.set_enabled(self.mode == InteractionMode::Brush);
    }
}
