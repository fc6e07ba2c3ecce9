use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::render::{ClearColor, ShadowConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Renderer", inline)]
#[serde(default)]
/// Output surface parameters applied once at startup.
pub struct RendererOptions {
    /// Linear RGB clear color.
    #[schemars(title = "Background")]
    pub background_color: [f32; 3],
    /// Physical-to-logical pixel ratio. `None` uses the host's device pixel
    /// ratio.
    #[schemars(title = "Pixel Ratio")]
    pub pixel_ratio: Option<f64>,
    /// Shadow-map setup.
    pub shadows: ShadowConfig,
}

impl RendererOptions {
    /// Background as a renderer clear color.
    #[must_use]
    pub fn clear_color(&self) -> ClearColor {
        ClearColor(self.background_color)
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0],
            pixel_ratio: None,
            shadows: ShadowConfig::default(),
        }
    }
}
