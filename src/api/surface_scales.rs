use crate::core::{
    BrushRect, ComposedScale, DataPoint, ScaleAxis, ScalePair, select_in_brush, select_in_lasso,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::SurfaceEvent;
use crate::interaction::LassoPath;

use super::ChartSurface;

impl ChartSurface {
    /// Composes a scale for an arbitrary range with the current transform.
    ///
    /// Uses the per-axis memo, so repeated calls with unchanged inputs are free.
    pub fn compose_scale(
        &mut self,
        axis: ScaleAxis,
        domain: (f64, f64),
        range: (f64, f64),
    ) -> ChartResult<ScalePair> {
        let transform = self.transform;
        let composer = match axis {
            ScaleAxis::X => &mut self.x_composer,
            ScaleAxis::Y => &mut self.y_composer,
        };
        composer.compose(domain, range, transform, axis)
    }

    /// Horizontal scale over `[0, width]`.
    pub fn x_scale(&mut self, domain: (f64, f64)) -> ChartResult<ScalePair> {
        let width = self.config.viewport.width;
        self.compose_scale(ScaleAxis::X, domain, (0.0, width))
    }

    /// Vertical scale over `[height, 0]` so larger values sit higher.
    pub fn y_scale(&mut self, domain: (f64, f64)) -> ChartResult<ScalePair> {
        let height = self.config.viewport.height;
        self.compose_scale(ScaleAxis::Y, domain, (height, 0.0))
    }

    #[must_use]
    pub fn lasso_path(&self) -> Option<&LassoPath> {
        self.lasso.path()
    }

    #[must_use]
    pub fn brush_rect(&self) -> Option<BrushRect> {
        self.brush.rect()
    }

    /// Places or clears the brush programmatically.
    pub fn set_brush_rect(&mut self, rect: Option<BrushRect>) -> ChartResult<()> {
        if let Some(rect) = rect
            && ![rect.x0, rect.y0, rect.x1, rect.y1]
                .iter()
                .all(|value| value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "brush rectangle must be finite".to_owned(),
            ));
        }
        self.brush.set_rect(rect);
        let rect = self.brush.rect();
        self.emit_event(SurfaceEvent::BrushChanged { rect });
        Ok(())
    }

    /// Drops both selections and aborts selection gestures in progress.
    pub fn clear_selection(&mut self) {
        let had_lasso = self.lasso.path().is_some();
        let had_brush = self.brush.rect().is_some();
        self.lasso.reset();
        self.brush.clear();
        if had_lasso {
            self.emit_event(SurfaceEvent::LassoCompleted { path: None });
        }
        if had_brush {
            self.emit_event(SurfaceEvent::BrushCompleted { rect: None });
        }
    }

    /// Indices of `points` inside the current lasso, empty without one.
    pub fn select_in_lasso(
        &mut self,
        points: &[DataPoint],
        x_domain: (f64, f64),
        y_domain: (f64, f64),
    ) -> ChartResult<Vec<usize>> {
        let (x_scale, y_scale) = self.composed_scales(x_domain, y_domain)?;
        Ok(match self.lasso.path() {
            Some(path) => select_in_lasso(points, path.points(), x_scale, y_scale),
            None => Vec::new(),
        })
    }

    /// Indices of `points` inside the current brush, empty without one.
    pub fn select_in_brush(
        &mut self,
        points: &[DataPoint],
        x_domain: (f64, f64),
        y_domain: (f64, f64),
    ) -> ChartResult<Vec<usize>> {
        let (x_scale, y_scale) = self.composed_scales(x_domain, y_domain)?;
        Ok(match self.brush.rect() {
            Some(rect) => select_in_brush(points, rect, x_scale, y_scale),
            None => Vec::new(),
        })
    }

    fn composed_scales(
        &mut self,
        x_domain: (f64, f64),
        y_domain: (f64, f64),
    ) -> ChartResult<(ComposedScale, ComposedScale)> {
        let x = self.x_scale(x_domain)?;
        let y = self.y_scale(y_domain)?;
        Ok((x.composed, y.composed))
    }
}
