use serde::{Deserialize, Serialize};

/// Opaque id returned by a frame request, used to cancel or match the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Platform animation-frame scheduling seam (`requestAnimationFrame` and friends).
///
/// The host delivers the callback later by calling
/// [`RenderTrigger::on_animation_frame`](super::RenderTrigger::on_animation_frame)
/// with the id it handed out.
pub trait FrameHost {
    fn request_animation_frame(&mut self) -> FrameRequestId;
    fn cancel_animation_frame(&mut self, id: FrameRequestId);
}

/// Headless frame host for tests and hosts that pump frames themselves.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    next_id: u64,
    pending: Vec<FrameRequestId>,
    pub requested_count: usize,
    pub cancelled_count: usize,
}

impl ManualFrameHost {
    #[must_use]
    pub fn pending(&self) -> &[FrameRequestId] {
        &self.pending
    }

    /// Removes and returns every outstanding request, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameHost for ManualFrameHost {
    fn request_animation_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.push(id);
        self.requested_count += 1;
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameRequestId) {
        if let Some(position) = self.pending.iter().position(|pending| *pending == id) {
            self.pending.remove(position);
            self.cancelled_count += 1;
        }
    }
}
