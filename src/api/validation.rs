use crate::error::{ChartError, ChartResult};

use super::SurfaceConfig;
use super::interaction_validation::{
    validate_brush_behavior, validate_lasso_behavior, validate_zoom_behavior,
};

pub(super) fn validate_surface_config(config: SurfaceConfig) -> ChartResult<SurfaceConfig> {
    config.viewport.validate()?;
    validate_zoom_behavior(config.zoom)?;
    validate_lasso_behavior(config.lasso)?;
    validate_brush_behavior(config.brush)?;
    if !config.drag_threshold_px.is_finite() || config.drag_threshold_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "drag_threshold_px must be finite and >= 0".to_owned(),
        ));
    }
    Ok(config)
}
