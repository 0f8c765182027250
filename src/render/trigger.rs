use std::time::Instant;

use tracing::{debug, trace};

use super::frame_host::{FrameHost, FrameRequestId};

/// Coalescing redraw scheduler for canvas renderers.
///
/// `update` compares the new deps with the last seen value; a change requests
/// one animation frame unless a request is already pending, so any number of
/// changes inside a frame produce a single draw. The deps passed to `new`
/// are the baseline and do not schedule anything. `teardown` (also run on
/// drop) cancels the outstanding request.
pub struct RenderTrigger<D, H, F>
where
    D: PartialEq,
    H: FrameHost,
    F: FnMut(),
{
    host: H,
    draw: F,
    deps: D,
    pending: Option<FrameRequestId>,
    profile_id: Option<String>,
    torn_down: bool,
    frames_drawn: u64,
}

impl<D, H, F> std::fmt::Debug for RenderTrigger<D, H, F>
where
    D: PartialEq + std::fmt::Debug,
    H: FrameHost + std::fmt::Debug,
    F: FnMut(),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTrigger")
            .field("host", &self.host)
            .field("deps", &self.deps)
            .field("pending", &self.pending)
            .field("profile_id", &self.profile_id)
            .field("torn_down", &self.torn_down)
            .field("frames_drawn", &self.frames_drawn)
            .finish_non_exhaustive()
    }
}

impl<D, H, F> RenderTrigger<D, H, F>
where
    D: PartialEq,
    H: FrameHost,
    F: FnMut(),
{
    #[must_use]
    pub fn new(host: H, deps: D, draw: F) -> Self {
        Self {
            host,
            draw,
            deps,
            pending: None,
            profile_id: None,
            torn_down: false,
            frames_drawn: 0,
        }
    }

    /// Logs each draw's duration at `debug` under this id.
    #[must_use]
    pub fn with_profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    #[must_use]
    pub fn deps(&self) -> &D {
        &self.deps
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Records new deps. Returns `true` when they differ from the previous value.
    pub fn update(&mut self, deps: D) -> bool {
        if self.deps == deps {
            return false;
        }
        self.deps = deps;
        self.schedule();
        true
    }

    /// Schedules a draw regardless of deps (e.g. after a container resize).
    pub fn request_redraw(&mut self) {
        self.schedule();
    }

    /// Host callback for a delivered animation frame.
    ///
    /// Runs the draw callback once when `id` is the pending request; stale or
    /// unknown ids are ignored. Returns `true` when a draw ran.
    pub fn on_animation_frame(&mut self, id: FrameRequestId) -> bool {
        if self.torn_down || self.pending != Some(id) {
            trace!(?id, "ignoring stale animation frame");
            return false;
        }
        self.pending = None;

        match self.profile_id.as_deref() {
            Some(profile_id) => {
                let started = Instant::now();
                (self.draw)();
                debug!(
                    profile_id,
                    elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0,
                    "frame drawn"
                );
            }
            None => (self.draw)(),
        }
        self.frames_drawn += 1;
        true
    }

    /// Cancels any pending frame and stops scheduling new ones.
    pub fn teardown(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_animation_frame(id);
            trace!(?id, "cancelled pending frame on teardown");
        }
        self.torn_down = true;
    }

    fn schedule(&mut self) {
        if self.torn_down || self.pending.is_some() {
            return;
        }
        let id = self.host.request_animation_frame();
        trace!(?id, "requested animation frame");
        self.pending = Some(id);
    }
}

impl<D, H, F> Drop for RenderTrigger<D, H, F>
where
    D: PartialEq,
    H: FrameHost,
    F: FnMut(),
{
    fn drop(&mut self) {
        self.teardown();
    }
}
