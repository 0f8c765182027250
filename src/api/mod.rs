mod interaction_validation;
mod observer_dispatch;
mod observer_registry;
mod surface;
mod surface_config;
mod surface_input;
mod surface_scales;
mod surface_snapshot;
mod validation;

pub use surface::ChartSurface;
pub use surface_config::SurfaceConfig;
pub use surface_snapshot::SurfaceSnapshot;
