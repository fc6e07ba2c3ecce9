//! Host-environment capabilities the render loop depends on.

use std::collections::BTreeSet;

use super::ViewportSize;

/// Where the viewport size comes from.
///
/// Resize notifications are not part of this trait: the host calls
/// [`ViewportController::on_resize`](super::ViewportController::on_resize)
/// when its size changes, and the controller re-reads [`size`](Self::size).
pub trait ViewportSource {
    /// Current viewport size in logical pixels.
    fn size(&self) -> ViewportSize;

    /// Device pixel ratio (physical pixels per logical pixel).
    fn pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Cancellation handle for a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Wrap a scheduler-specific request id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The wrapped request id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Per-frame callback scheduler (one callback per display refresh).
///
/// A requested frame results in exactly one later call to
/// [`ViewportController::on_frame`](super::ViewportController::on_frame)
/// unless it is cancelled first.
pub trait FrameScheduler {
    /// Ask the host for one more frame callback.
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a pending request. Unknown or already-fired tokens are
    /// ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Viewport with a size set by the caller. Used for off-screen runs and
/// tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    /// Reported size.
    pub size: ViewportSize,
    /// Reported device pixel ratio.
    pub pixel_ratio: f64,
}

impl FixedViewport {
    /// Viewport of the given size at a pixel ratio of 1.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            pixel_ratio: 1.0,
        }
    }

    /// Change the reported size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = ViewportSize::new(width, height);
    }
}

impl ViewportSource for FixedViewport {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

/// Scheduler whose frames are fired by hand.
///
/// Keeps the set of outstanding requests so a driver can check that each
/// tick requested exactly one follow-up frame.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeSet<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending request, marking it fired. The caller is
    /// then expected to invoke `on_frame`.
    pub fn fire(&mut self) -> Option<FrameToken> {
        self.pending.pop_first()
    }

    /// Requests that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total frames ever requested.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn before firing.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        let _ = self.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending.remove(&token) {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_fires_in_request_order() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.fire(), Some(a));
        assert_eq!(scheduler.fire(), Some(b));
        assert_eq!(scheduler.fire(), None);
        assert_eq!(scheduler.requested(), 2);
    }

    #[test]
    fn cancelling_fired_token_is_ignored() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame();
        let _ = scheduler.fire();
        scheduler.cancel_frame(a);
        assert_eq!(scheduler.cancelled(), 0);

        let b = scheduler.request_frame();
        scheduler.cancel_frame(b);
        assert_eq!(scheduler.cancelled(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn fixed_viewport_resizes() {
        let mut viewport = FixedViewport::new(800, 600);
        viewport.resize(1024, 768);
        assert_eq!(viewport.size(), ViewportSize::new(1024, 768));
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }
}
