//! Standalone window backed by winit and wgpu.
//!
//! The window is the viewport and the display target, and its redraw
//! requests are the frame callbacks. Number keys play the configured tour
//! stops; Escape or closing the window stops the loop.
//!
//! ```no_run
//! # use vantage::{Viewer, scene::Scene};
//! # let scene = Scene::new();
//! Viewer::builder()
//!     .with_scene(scene)
//!     .with_title("Room")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    error::VantageError,
    options::{Options, TourStop},
    render::{Renderer, WgpuRenderer},
    scene::Scene,
    util::frame_timing::FrameTiming,
    viewport::{
        FrameScheduler, FrameToken, ViewportController, ViewportSize,
        ViewportSource,
    },
};

// ── Host capabilities ────────────────────────────────────────────────────

/// Viewport reading the window's logical inner size.
struct WindowViewport {
    window: Arc<Window>,
}

impl ViewportSource for WindowViewport {
    fn size(&self) -> ViewportSize {
        let logical = self
            .window
            .inner_size()
            .to_logical::<u32>(self.window.scale_factor());
        ViewportSize::new(logical.width, logical.height)
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }
}

/// Frames are window redraws. At most one request is outstanding.
struct WindowScheduler {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<FrameToken>,
}

impl WindowScheduler {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    /// Claim the outstanding request. Redraws the OS asks for on its own
    /// find nothing pending.
    fn take_pending(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.pending = Some(token);
        self.window.request_redraw();
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

type WindowController =
    ViewportController<WgpuRenderer, WindowViewport, WindowScheduler>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scene: Scene,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            options: None,
            title: "Vantage".into(),
        }
    }

    /// Scene to display. It must contain the four bound members.
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            scene: self.scene,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window rendering one room scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scene: Scene,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the loop stops.
    ///
    /// # Errors
    ///
    /// [`VantageError::Viewer`] if the event loop cannot be created, or the
    /// error that ended the loop: a scene missing a bound member, a
    /// renderer that could not attach, or a failed frame under
    /// [`FrameErrorPolicy::Stop`](crate::options::FrameErrorPolicy::Stop).
    pub fn run(self) -> Result<(), VantageError> {
        let event_loop =
            EventLoop::new().map_err(|e| VantageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            controller: None,
            scene: Some(self.scene),
            options: self.options,
            title: self.title,
            timing: FrameTiming::default(),
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VantageError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    controller: Option<WindowController>,
    /// Handed to the controller when the window appears.
    scene: Option<Scene>,
    options: Options,
    title: String,
    timing: FrameTiming,
    /// First fatal error; returned from [`Viewer::run`].
    error: Option<VantageError>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: VantageError) {
        log::error!("{error}");
        if let Some(controller) = &mut self.controller {
            controller.stop();
        }
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn create_controller(
        &mut self,
        window: &Arc<Window>,
    ) -> Result<WindowController, VantageError> {
        let scene = self
            .scene
            .take()
            .ok_or_else(|| VantageError::Viewer("scene already consumed".into()))?;
        let mut controller = ViewportController::new(
            scene,
            WgpuRenderer::new(),
            WindowViewport {
                window: window.clone(),
            },
            WindowScheduler::new(window.clone()),
            &self.options,
        )?;
        controller.start(window.clone().into())?;
        Ok(controller)
    }

    fn play_tour_stop(&mut self, key: usize) -> Result<(), VantageError> {
        let Some(stop) = self.options.tour.stop_for_key(key) else {
            log::debug!("no tour stop bound to key {key}");
            return Ok(());
        };
        let Some(controller) = &mut self.controller else {
            return Ok(());
        };
        play_stop(controller, stop)?;
        log::info!("tour stop {key}");
        Ok(())
    }
}

/// Build every tween of `stop` first, so a stop naming an unknown member
/// starts none of them.
fn play_stop(
    controller: &mut WindowController,
    stop: &TourStop,
) -> Result<(), VantageError> {
    let mut tweens = Vec::with_capacity(3);
    if let Some(name) = &stop.camera {
        tweens.push(controller.move_camera(name)?);
    }
    if let Some(name) = &stop.focus {
        tweens.push(controller.move_focus(name)?);
    }
    if let Some(name) = &stop.light {
        tweens.push(controller.move_light(name)?);
    }
    for tween in tweens {
        let _ = controller.start_tween(tween)?;
    }
    Ok(())
}

/// Tour key number for the top-row digits `1`..`9`.
fn digit_key(code: KeyCode) -> Option<usize> {
    Some(match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return None,
    })
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, VantageError::Viewer(e.to_string()));
                return;
            }
        };

        match self.create_controller(&window) {
            Ok(controller) => self.controller = Some(controller),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(controller) = &mut self.controller {
                controller.stop();
            }
            event_loop.exit();
            return;
        }

        let Some(controller) = &mut self.controller else {
            return;
        };

        match event {
            WindowEvent::Resized(_) => {
                // Minimised windows report zero; the last size stays.
                if let Err(e) = controller.on_resize() {
                    log::debug!("resize ignored: {e}");
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if self.options.renderer.pixel_ratio.is_none() {
                    controller.renderer_mut().set_output_scaling(scale_factor);
                }
                if let Err(e) = controller.on_resize() {
                    log::debug!("resize ignored: {e}");
                }
            }

            WindowEvent::RedrawRequested => {
                if controller.scheduler_mut().take_pending().is_none() {
                    return;
                }
                let timestamp_ms = self.timing.tick();
                if let Some(fps) = self.timing.take_report() {
                    log::debug!("{fps:.1} fps over {} frames", controller.frames());
                }
                if let Err(e) = controller.on_frame(timestamp_ms) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    controller.stop();
                    event_loop.exit();
                    return;
                }
                if let Some(key) = digit_key(code) {
                    if let Err(e) = self.play_tour_stop(key) {
                        log::warn!("tour stop {key} not played: {e}");
                    }
                }
            }

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(controller) = &mut self.controller {
            controller.stop();
        }
    }
}
