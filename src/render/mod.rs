mod frame_host;
mod trigger;

pub use frame_host::{FrameHost, FrameRequestId, ManualFrameHost};
pub use trigger::RenderTrigger;
