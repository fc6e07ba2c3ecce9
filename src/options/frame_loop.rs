use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the render loop does when a frame fails.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FrameErrorPolicy {
    /// Log the failure and keep ticking; the next frame is already
    /// requested.
    #[default]
    Continue,
    /// Stop the loop and surface the error to the host.
    Stop,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Frame Loop", inline)]
#[serde(default)]
/// Render-loop behaviour.
pub struct FrameLoopOptions {
    /// Failure handling for a single frame.
    pub on_error: FrameErrorPolicy,
}
