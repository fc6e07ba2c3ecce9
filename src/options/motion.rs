use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{tween::DEFAULT_DURATION_MS, EasingFunction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Defaults for camera, light and focus moves.
pub struct MotionOptions {
    /// Move length in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0.0, max = 10000.0), extend("step" = 50.0))]
    pub duration_ms: f64,
    /// Easing curve.
    pub easing: EasingFunction,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: EasingFunction::DEFAULT,
        }
    }
}
