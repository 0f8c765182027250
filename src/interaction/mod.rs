pub mod animation;
pub mod brush;
pub mod drag;
pub mod lasso;
pub mod pan;
pub mod wheel;
pub mod zoom;

use serde::{Deserialize, Serialize};

pub use animation::{AnimationSample, TransformAnimation};
pub use brush::{BrushBehavior, BrushHandle, BrushOutcome, BrushSelector, PersistMode};
pub use drag::{DragMove, DragPhase, DragRelease, DragTracker};
pub use lasso::{LassoBehavior, LassoOutcome, LassoPath, LassoSelector};
pub use pan::{PanBehavior, PanController, PanRelease};
pub use wheel::{DeltaMode, NormalizedWheel, WheelInput};
pub use zoom::{ZoomBehavior, ZoomController, zoom_transform};

/// Lifecycle of a single controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active,
}

impl From<DragPhase> for GestureState {
    fn from(phase: DragPhase) -> Self {
        match phase {
            DragPhase::Idle => Self::Idle,
            DragPhase::Pressed | DragPhase::Dragging => Self::Active,
        }
    }
}

/// Which controller owns pointer sequences on a chart surface.
///
/// Exactly one mode is current; a controller only receives input while the
/// mode selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    None,
    /// Drag pans; the wheel zooms.
    Pan,
    /// Wheel and pinch zoom; drags are ignored.
    Zoom,
    Lasso,
    Brush,
}

impl InteractionMode {
    #[must_use]
    pub const fn routes_drag_to_pan(self) -> bool {
        matches!(self, Self::Pan)
    }

    #[must_use]
    pub const fn routes_wheel_to_zoom(self) -> bool {
        matches!(self, Self::Pan | Self::Zoom)
    }

    #[must_use]
    pub const fn routes_pinch_to_zoom(self) -> bool {
        matches!(self, Self::Zoom)
    }
}
