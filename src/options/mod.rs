//! Centralized runtime options with TOML preset support.
//!
//! Scene bindings, renderer setup, motion defaults, frame-loop failure
//! handling and tour stops live here. Options serialize to/from TOML so a
//! room can ship a preset next to its scene.

mod frame_loop;
mod motion;
mod renderer;
mod tour;

use std::path::Path;

pub use frame_loop::{FrameErrorPolicy, FrameLoopOptions};
pub use motion::MotionOptions;
pub use renderer::RendererOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tour::{TourOptions, TourStop};

use crate::error::VantageError;
use crate::scene::BindingNames;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Names of the camera, light, room and focal-point members.
    pub scene: BindingNames,
    /// Output surface parameters.
    pub renderer: RendererOptions,
    /// Defaults for camera, light and focus moves.
    pub motion: MotionOptions,
    /// Render-loop failure handling.
    pub frame_loop: FrameLoopOptions,
    /// Viewer tour stops.
    #[schemars(skip)]
    pub tour: TourOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`VantageError::OptionsParse`] on malformed TOML or unknown enum
    /// values.
    pub fn from_toml(content: &str) -> Result<Self, VantageError> {
        toml::from_str(content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`VantageError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`VantageError::OptionsParse`] if serialization fails,
    /// [`VantageError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }
}
