use serde::{Deserialize, Serialize};

use crate::core::{Direction, Viewport, ZoomExtent};
use crate::error::{ChartError, ChartResult};
use crate::interaction::drag::DEFAULT_DRAG_THRESHOLD_PX;
use crate::interaction::{
    BrushBehavior, InteractionMode, LassoBehavior, PanBehavior, PersistMode, ZoomBehavior,
};

use super::validation::validate_surface_config;

/// Public chart-surface bootstrap configuration.
///
/// Serializable so hosts can persist and reload interaction setup; the
/// transform itself is runtime state and is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub mode: InteractionMode,
    #[serde(default)]
    pub pan: PanBehavior,
    #[serde(default)]
    pub zoom: ZoomBehavior,
    #[serde(default)]
    pub lasso: LassoBehavior,
    #[serde(default)]
    pub brush: BrushBehavior,
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f64,
}

impl SurfaceConfig {
    /// Creates a config with default behaviors and no interaction mode selected.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: InteractionMode::None,
            pan: PanBehavior::default(),
            zoom: ZoomBehavior::default(),
            lasso: LassoBehavior::default(),
            brush: BrushBehavior::default(),
            drag_threshold_px: default_drag_threshold_px(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_pan_axis(mut self, axis: Direction) -> Self {
        self.pan.axis = axis;
        self
    }

    #[must_use]
    pub fn with_zoom_extent(mut self, extent: ZoomExtent) -> Self {
        self.zoom.extent = extent;
        self
    }

    #[must_use]
    pub fn with_wheel_step(mut self, wheel_step: f64) -> Self {
        self.zoom.wheel_step = wheel_step;
        self
    }

    /// Turns the viewport containment constraint on or off for pan and zoom.
    #[must_use]
    pub fn with_constrain_to_viewport(mut self, enabled: bool) -> Self {
        self.pan.constrain_to_viewport = enabled;
        self.zoom.constrain_to_viewport = enabled;
        self
    }

    #[must_use]
    pub fn with_lasso_behavior(mut self, behavior: LassoBehavior) -> Self {
        self.lasso = behavior;
        self
    }

    #[must_use]
    pub fn with_brush_behavior(mut self, behavior: BrushBehavior) -> Self {
        self.brush = behavior;
        self
    }

    #[must_use]
    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.brush.persist_mode = mode;
        self
    }

    #[must_use]
    pub fn with_drag_threshold_px(mut self, threshold_px: f64) -> Self {
        self.drag_threshold_px = threshold_px;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_surface_config(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_drag_threshold_px() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}
