use glam::{Mat4, Vec3};

use super::{ClearColor, RenderError, Renderer, ShadowConfig};
use crate::scene::{MemberId, Scene};

/// One scene member as seen by the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMember {
    /// Member name.
    pub name: String,
    /// Normalized device coordinates (x, y in [-1, 1], z in [0, 1] when
    /// inside the clip volume).
    pub ndc: Vec3,
    /// Whether the member lies inside the view frustum.
    pub visible: bool,
}

/// Everything the headless backend computed for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Camera eye position.
    pub eye: Vec3,
    /// Camera vertical FOV in degrees at draw time.
    pub fov_degrees: f32,
    /// Camera aspect at draw time.
    pub aspect: f32,
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Output size in physical pixels.
    pub physical_size: (u32, u32),
    /// Every member except the camera, projected.
    pub members: Vec<ProjectedMember>,
}

impl RenderedFrame {
    /// Projection of a named member, if it was drawn.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&ProjectedMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Renderer that projects the scene on the CPU and records the result.
///
/// Attaches to a named mount point instead of a window, which makes it the
/// backend of choice for tests and off-screen runs.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    mount: Option<String>,
    size: (u32, u32),
    scaling: f64,
    background: ClearColor,
    shadows: ShadowConfig,
    frames_rendered: u64,
    last_frame: Option<RenderedFrame>,
}

impl HeadlessRenderer {
    /// Unattached renderer with 1:1 output scaling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scaling: 1.0,
            ..Self::default()
        }
    }

    /// Mount point passed to [`attach`](Renderer::attach).
    #[must_use]
    pub fn mount(&self) -> Option<&str> {
        self.mount.as_deref()
    }

    /// Logical output size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Physical-to-logical pixel ratio.
    #[must_use]
    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Clear color.
    #[must_use]
    pub fn background(&self) -> ClearColor {
        self.background
    }

    /// Shadow configuration.
    #[must_use]
    pub fn shadows(&self) -> ShadowConfig {
        self.shadows
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.last_frame.as_ref()
    }

    fn physical_size(&self) -> (u32, u32) {
        let scale = |v: u32| (f64::from(v) * self.scaling).round() as u32;
        (scale(self.size.0), scale(self.size.1))
    }
}

impl Renderer for HeadlessRenderer {
    type Target = String;

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_output_scaling(&mut self, ratio: f64) {
        self.scaling = ratio;
    }

    fn set_background_color(&mut self, color: ClearColor) {
        self.background = color;
    }

    fn configure_shadows(&mut self, shadows: ShadowConfig) {
        self.shadows = shadows;
    }

    fn attach(&mut self, target: String) -> Result<(), RenderError> {
        log::debug!("headless renderer mounted at '{target}'");
        self.mount = Some(target);
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: MemberId) -> Result<(), RenderError> {
        if self.mount.is_none() {
            return Err(RenderError::NotAttached);
        }
        let (node, cam) =
            scene.camera(camera).map_err(|_| RenderError::NoCamera(camera))?;
        let view_proj = cam.view_projection(node.position);

        let members = scene
            .members()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != camera.index())
            .map(|(_, member)| {
                let clip = view_proj * member.position.extend(1.0);
                let visible = clip.w > 0.0
                    && clip.x.abs() <= clip.w
                    && clip.y.abs() <= clip.w
                    && (0.0..=clip.w).contains(&clip.z);
                // A member at the eye has no projection.
                let ndc = if clip.w.abs() > f32::EPSILON {
                    clip.truncate() / clip.w
                } else {
                    Vec3::ZERO
                };
                ProjectedMember {
                    name: member.name.clone(),
                    ndc,
                    visible,
                }
            })
            .collect();

        self.last_frame = Some(RenderedFrame {
            eye: node.position,
            fov_degrees: cam.fovy,
            aspect: cam.aspect,
            view_proj,
            physical_size: self.physical_size(),
            members,
        });
        self.frames_rendered += 1;
        Ok(())
    }
}
