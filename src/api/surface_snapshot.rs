use serde::{Deserialize, Serialize};

use crate::core::{AffineTransform, BrushRect};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, LassoPath};

use super::ChartSurface;

/// Everything a renderer depends on, in one comparable value.
///
/// Intended as the dependency value of a [`crate::render::RenderTrigger`]:
/// two equal snapshots draw the same frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub transform: AffineTransform,
    pub mode: InteractionMode,
    pub lasso: Option<LassoPath>,
    pub brush: Option<BrushRect>,
}

impl SurfaceSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}

impl ChartSurface {
    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            transform: self.transform,
            mode: self.mode,
            lasso: self.lasso.path().cloned(),
            brush: self.brush.rect(),
        }
    }
}
