//! Render-loop lifecycle and viewport tracking.
//!
//! [`ViewportController`] owns the scene, the tween group and the renderer,
//! and is driven entirely by its host: a [`FrameScheduler`] delivers frame
//! callbacks and resize notifications arrive through
//! [`ViewportController::on_resize`].

mod controller;
/// Host capabilities (viewport size source, frame scheduler).
pub mod host;
mod state;

use std::fmt;

pub use controller::ViewportController;
pub use host::{
    FixedViewport, FrameScheduler, FrameToken, ManualScheduler, ViewportSource,
};
pub use state::{ViewportSize, ViewportState};

/// Render-loop lifecycle state.
///
/// `Uninitialized → Running → Stopped`, or `Uninitialized → Stopped`.
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    /// Constructed, not yet attached or ticking.
    Uninitialized,
    /// Attached and requesting frames.
    Running,
    /// Stopped for good; frame callbacks are ignored.
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Running => "running",
            Self::Stopped => "stopped",
        })
    }
}
