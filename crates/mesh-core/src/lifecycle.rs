//! Run-state machine for the animation loop.
//!
//! The component is either `Animating` (exactly one frame request pending) or
//! `Stopped` (none). Detaching stops for good.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Animating,
    Stopped,
}

/// Source of per-frame callbacks (`requestAnimationFrame` on the web).
pub trait FrameScheduler {
    type Handle: Copy;

    fn request(&mut self) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

pub struct Animator<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    detached: bool,
}

impl<S: FrameScheduler> Animator<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            detached: false,
        }
    }

    pub fn state(&self) -> RunState {
        if self.pending.is_some() {
            RunState::Animating
        } else {
            RunState::Stopped
        }
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Stopped → Animating. No-op when already animating or detached.
    pub fn start(&mut self) {
        if self.detached || self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request();
        log::debug!("[mesh] animation started");
    }

    /// Animating → Stopped, cancelling the pending frame request.
    pub fn stop(&mut self) {
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel(h);
            log::debug!("[mesh] animation stopped");
        }
    }

    /// Call at the top of each frame callback. Returns false when the frame
    /// should not run (stopped or detached since it was requested).
    pub fn begin_frame(&mut self) -> bool {
        if self.detached {
            return false;
        }
        self.pending.take().is_some()
    }

    /// Call once the frame is drawn; re-requests while still animating.
    pub fn end_frame(&mut self) {
        if !self.detached && self.pending.is_none() {
            self.pending = self.scheduler.request();
        }
    }

    pub fn detach(&mut self) {
        self.stop();
        self.detached = true;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
