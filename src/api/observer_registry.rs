use crate::error::{ChartError, ChartResult};
use crate::extensions::SurfaceObserver;

use super::ChartSurface;

impl ChartSurface {
    /// Registers an observer with a unique identifier.
    ///
    /// Observers are notified in registration order.
    pub fn register_observer(&mut self, observer: Box<dyn SurfaceObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.observers.contains_key(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.shift_remove(observer_id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }
}
