//! chart-interact: view-transform and selection engine for 2D charts.
//!
//! Pan and zoom edit a single affine transform that is composed onto base
//! linear scales; lasso and brush selectors report pixel-space regions that
//! are tested against data through the same composed scales. Rendering is
//! left to the host and driven through [`render::RenderTrigger`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartSurface, SurfaceConfig, SurfaceSnapshot};
pub use error::{ChartError, ChartResult};
