use tracing::trace;

use crate::extensions::{SurfaceContext, SurfaceEvent};
use crate::interaction::GestureState;

use super::ChartSurface;

impl ChartSurface {
    #[must_use]
    pub fn context(&self) -> SurfaceContext {
        SurfaceContext {
            viewport: self.config.viewport,
            transform: self.transform,
            mode: self.mode,
            gesture_active: self.gesture_state() == GestureState::Active,
            brush_rect: self.brush.rect(),
        }
    }

    pub(super) fn emit_event(&mut self, event: SurfaceEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.context();
        trace!(?event, observers = self.observers.len(), "dispatching surface event");
        for observer in self.observers.values_mut() {
            observer.on_event(&event, &context);
        }
    }
}
