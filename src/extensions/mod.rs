mod observers;

pub use observers::{SurfaceContext, SurfaceEvent, SurfaceObserver};
