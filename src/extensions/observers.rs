use serde::{Deserialize, Serialize};

use crate::core::{AffineTransform, BrushRect, Point, Viewport};
use crate::interaction::{InteractionMode, LassoPath};

/// Read-only surface state passed alongside every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceContext {
    pub viewport: Viewport,
    pub transform: AffineTransform,
    pub mode: InteractionMode,
    pub gesture_active: bool,
    pub brush_rect: Option<BrushRect>,
}

/// Outbound notifications from a chart surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// The surface stored a new transform; renderers should re-read scales.
    TransformChanged { transform: AffineTransform },
    PanStarted,
    PanEnded,
    /// A press released without dragging while panning.
    Clicked { point: Point },
    /// The in-progress lasso outline grew.
    LassoChanged { vertices: usize },
    /// `None` means "clear selection".
    LassoCompleted { path: Option<LassoPath> },
    BrushChanged { rect: Option<BrushRect> },
    /// `None` means "clear selection".
    BrushCompleted { rect: Option<BrushRect> },
    ModeChanged { mode: InteractionMode },
    ViewportResized { viewport: Viewport },
}

/// Observer hook for hosts and renderers.
///
/// Observers see events and context only; they cannot mutate the surface.
pub trait SurfaceObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &SurfaceEvent, context: &SurfaceContext);
}
