use crate::error::{ChartError, ChartResult};
use crate::interaction::{BrushBehavior, LassoBehavior, ZoomBehavior};

pub(super) fn validate_zoom_behavior(behavior: ZoomBehavior) -> ChartResult<ZoomBehavior> {
    behavior.extent.validate()?;
    if !behavior.wheel_step.is_finite() || behavior.wheel_step <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "zoom wheel_step must be finite and > 0".to_owned(),
        ));
    }
    Ok(behavior)
}

pub(super) fn validate_lasso_behavior(behavior: LassoBehavior) -> ChartResult<LassoBehavior> {
    if !behavior.min_point_distance_px.is_finite() || behavior.min_point_distance_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "lasso min_point_distance_px must be finite and >= 0".to_owned(),
        ));
    }
    Ok(behavior)
}

pub(super) fn validate_brush_behavior(behavior: BrushBehavior) -> ChartResult<BrushBehavior> {
    if !behavior.min_size_px.is_finite() || behavior.min_size_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "brush min_size_px must be finite and >= 0".to_owned(),
        ));
    }
    if !behavior.handle_width_px.is_finite() || behavior.handle_width_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "brush handle_width_px must be finite and >= 0".to_owned(),
        ));
    }
    Ok(behavior)
}
