use std::fmt::Display;

use super::{ClearColor, RenderError, Renderer, ShadowConfig};
use crate::scene::{MemberId, Scene};

/// Device, queue and the configured window surface.
struct SurfaceState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

fn init_failed(stage: &'static str, e: impl Display) -> RenderError {
    RenderError::Init {
        stage,
        message: e.to_string(),
    }
}

impl SurfaceState {
    async fn connect(
        target: wgpu::SurfaceTarget<'static>,
        (width, height): (u32, u32),
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(target)
            .map_err(|e| init_failed("surface creation", e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(|e| init_failed("adapter request", e))?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vantage"),
                ..Default::default()
            })
            .await
            .map_err(|e| init_failed("device request", e))?;

        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or_else(|| {
                init_failed("surface configuration", "unsupported by adapter")
            })?;
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);
        log::info!(
            "surface ready: {:?} {}x{}",
            config.format,
            config.width,
            config.height
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    fn resize(&mut self, (width, height): (u32, u32)) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn clear_and_present(&self, color: ClearColor) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                return Err(RenderError::SurfaceReset);
            }
            Err(e) => return Err(RenderError::Backend(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b] = color.0;
        let mut encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Clear Encoder"),
                });
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
        }
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Renderer presenting to a wgpu window surface.
///
/// Each frame clears the swapchain image to the background color and
/// presents it. Size and scaling set before [`attach`](Renderer::attach)
/// are applied when the surface is created. There are no shadow passes:
/// [`configure_shadows`](Renderer::configure_shadows) is recorded and
/// otherwise ignored by this backend.
pub struct WgpuRenderer {
    surface: Option<SurfaceState>,
    logical_size: (u32, u32),
    scaling: f64,
    background: ClearColor,
    shadows: ShadowConfig,
}

impl Default for WgpuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuRenderer {
    /// Unattached renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            logical_size: (1, 1),
            scaling: 1.0,
            background: ClearColor::BLACK,
            shadows: ShadowConfig::default(),
        }
    }

    /// Whether a surface has been attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Shadow configuration as last set. Not rendered by this backend.
    #[must_use]
    pub fn shadows(&self) -> ShadowConfig {
        self.shadows
    }

    fn physical_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((f64::from(v) * self.scaling).round() as u32).max(1);
        (scale(self.logical_size.0), scale(self.logical_size.1))
    }

    fn resize_surface(&mut self) {
        let size = self.physical_size();
        if let Some(surface) = &mut self.surface {
            surface.resize(size);
        }
    }
}

impl Renderer for WgpuRenderer {
    type Target = wgpu::SurfaceTarget<'static>;

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.logical_size = (width, height);
        self.resize_surface();
    }

    fn set_output_scaling(&mut self, ratio: f64) {
        self.scaling = ratio;
        self.resize_surface();
    }

    fn set_background_color(&mut self, color: ClearColor) {
        self.background = color;
    }

    fn configure_shadows(&mut self, shadows: ShadowConfig) {
        self.shadows = shadows;
    }

    fn attach(&mut self, target: Self::Target) -> Result<(), RenderError> {
        let surface =
            pollster::block_on(SurfaceState::connect(target, self.physical_size()))?;
        self.surface = Some(surface);
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: MemberId) -> Result<(), RenderError> {
        let surface = self.surface.as_ref().ok_or(RenderError::NotAttached)?;
        if scene.camera(camera).is_err() {
            return Err(RenderError::NoCamera(camera));
        }
        surface.clear_and_present(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_before_attach_fails() {
        let mut renderer = WgpuRenderer::new();
        let scene = Scene::new();
        assert!(matches!(
            renderer.render(&scene, MemberId(0)),
            Err(RenderError::NotAttached)
        ));
        assert!(!renderer.is_attached());
    }

    #[test]
    fn configuration_is_kept_until_attach() {
        let mut renderer = WgpuRenderer::new();
        renderer.set_viewport_size(800, 600);
        renderer.set_output_scaling(1.5);
        assert_eq!(renderer.physical_size(), (1200, 900));

        let shadows = ShadowConfig {
            enabled: false,
            ..ShadowConfig::default()
        };
        renderer.configure_shadows(shadows);
        assert_eq!(renderer.shadows(), shadows);
    }
}
