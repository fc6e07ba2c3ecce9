//! Renderer abstraction and backends.
//!
//! The render loop talks to a [`Renderer`] only; [`HeadlessRenderer`]
//! records frames for tests and off-screen runs, `WgpuRenderer` (feature
//! `viewer`) presents to a window surface.

#[cfg(feature = "viewer")]
mod gpu;
mod headless;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[cfg(feature = "viewer")]
pub use gpu::WgpuRenderer;
pub use headless::{HeadlessRenderer, ProjectedMember, RenderedFrame};

use crate::scene::{MemberId, Scene};

/// Shadow-map filtering quality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadowFilter {
    /// Single unfiltered depth comparison.
    Basic,
    /// Percentage-closer filtering.
    Pcf,
    /// Percentage-closer filtering with soft edges.
    #[default]
    PcfSoft,
    /// Variance shadow maps.
    Vsm,
}

/// Shadow-mapping configuration handed to the renderer once at startup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[schemars(title = "Shadows", inline)]
#[serde(default)]
pub struct ShadowConfig {
    /// Whether shadow maps are rendered at all.
    pub enabled: bool,
    /// Filtering quality.
    pub filter: ShadowFilter,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: ShadowFilter::PcfSoft,
        }
    }
}

/// Linear RGB clear color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearColor(pub [f32; 3]);

impl ClearColor {
    /// Opaque black.
    pub const BLACK: ClearColor = ClearColor([0.0, 0.0, 0.0]);

    /// Color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self([channel(16), channel(8), channel(0)])
    }
}

/// Errors reported by a renderer backend.
#[derive(Debug)]
pub enum RenderError {
    /// `render` was called before `attach`.
    NotAttached,
    /// The camera handle passed to `render` is not a camera member.
    NoCamera(MemberId),
    /// Surface, adapter or device setup failed during attach.
    Init {
        /// Setup step that failed.
        stage: &'static str,
        /// Backend message.
        message: String,
    },
    /// The surface was lost or outdated and has been reconfigured; the
    /// frame was dropped.
    SurfaceReset,
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttached => write!(f, "renderer is not attached"),
            Self::NoCamera(id) => {
                write!(f, "member #{} is not a camera", id.index())
            }
            Self::Init { stage, message } => {
                write!(f, "GPU {stage} failed: {message}")
            }
            Self::SurfaceReset => {
                write!(f, "surface lost or outdated; frame dropped")
            }
            Self::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Output side of the render loop.
///
/// Configuration calls may arrive before [`attach`](Self::attach); backends
/// must remember them and apply them once an output surface exists.
pub trait Renderer {
    /// Host display object the output surface is attached to.
    type Target;

    /// Resize the output, in CSS/logical pixels.
    fn set_viewport_size(&mut self, width: u32, height: u32);
    /// Ratio of physical to logical pixels.
    fn set_output_scaling(&mut self, ratio: f64);
    /// Color the output is cleared to each frame.
    fn set_background_color(&mut self, color: ClearColor);
    /// Shadow-mapping setup.
    fn configure_shadows(&mut self, shadows: ShadowConfig);
    /// Attach the output surface to the host display target.
    ///
    /// # Errors
    ///
    /// Backend-specific; typically GPU context creation failures.
    fn attach(&mut self, target: Self::Target) -> Result<(), RenderError>;
    /// Draw `scene` from the viewpoint of the `camera` member.
    ///
    /// # Errors
    ///
    /// [`RenderError::NotAttached`] before attach, plus backend failures.
    fn render(&mut self, scene: &Scene, camera: MemberId) -> Result<(), RenderError>;
}
