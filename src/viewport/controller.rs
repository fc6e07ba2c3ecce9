use glam::Vec3;

use super::{FrameScheduler, FrameToken, LoopState, ViewportSource, ViewportState};
use crate::animation::{EasingFunction, Tween, TweenGroup, TweenId};
use crate::camera::{CameraControl, FovCorrection, PerspectiveCamera};
use crate::error::VantageError;
use crate::options::{FrameErrorPolicy, MotionOptions, Options};
use crate::render::Renderer;
use crate::scene::{MemberId, ResolvedHandles, Scene, SceneBinder};

/// Drives a room scene: binds its camera, light, room and focal point,
/// keeps the camera's FOV corrected for the viewport, and renders one frame
/// per scheduler callback.
///
/// The host wires three things to it:
///
/// - frame callbacks from `S` → [`on_frame`](Self::on_frame)
/// - viewport size changes → [`on_resize`](Self::on_resize)
/// - the display target → [`start`](Self::start)
pub struct ViewportController<R, V, S>
where
    R: Renderer,
    V: ViewportSource,
    S: FrameScheduler,
{
    scene: Scene,
    tweens: TweenGroup,
    handles: ResolvedHandles,
    renderer: R,
    viewport: V,
    scheduler: S,
    state: ViewportState,
    loop_state: LoopState,
    pending_frame: Option<FrameToken>,
    motion: MotionOptions,
    on_error: FrameErrorPolicy,
    frames: u64,
    last_timestamp_ms: f64,
}

impl<R, V, S> ViewportController<R, V, S>
where
    R: Renderer,
    V: ViewportSource,
    S: FrameScheduler,
{
    /// Bind `scene`, configure `renderer` and capture the FOV baseline.
    ///
    /// The baseline is the camera's vertical FOV and the viewport height as
    /// they are right now; the first correction is applied immediately.
    ///
    /// # Errors
    ///
    /// - [`VantageError::MissingSceneMember`] if any of the four bound names
    ///   is absent (nothing is configured in that case)
    /// - [`VantageError::UnexpectedMemberKind`] if the camera member is not
    ///   a camera
    /// - [`VantageError::InvalidViewportDimensions`] for a zero-sized
    ///   viewport
    pub fn new(
        mut scene: Scene,
        mut renderer: R,
        viewport: V,
        scheduler: S,
        options: &Options,
    ) -> Result<Self, VantageError> {
        let handles = SceneBinder::resolve(scene.members(), &options.scene)?;
        let size = viewport.size();

        let (_, camera) = scene.camera_mut(handles.camera)?;
        let correction = FovCorrection::new(camera.fov_degrees(), size)?;
        let projection = correction.apply(camera, size)?;

        let pixel_ratio = options
            .renderer
            .pixel_ratio
            .unwrap_or_else(|| viewport.pixel_ratio());
        renderer.set_output_scaling(pixel_ratio);
        renderer.set_background_color(options.renderer.clear_color());
        renderer.set_viewport_size(size.width, size.height);
        renderer.configure_shadows(options.renderer.shadows);

        log::info!(
            "viewport {size} @{pixel_ratio}x, camera fov {:.2}° aspect {:.3}",
            projection.fov_degrees,
            projection.aspect
        );

        Ok(Self {
            scene,
            tweens: TweenGroup::new(),
            handles,
            renderer,
            viewport,
            scheduler,
            state: ViewportState::new(size, correction),
            loop_state: LoopState::Uninitialized,
            pending_frame: None,
            motion: options.motion,
            on_error: options.frame_loop.on_error,
            frames: 0,
            last_timestamp_ms: 0.0,
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Attach the renderer's output to `target` and request the first
    /// frame.
    ///
    /// # Errors
    ///
    /// [`VantageError::InvalidTransition`] unless the loop is
    /// `Uninitialized`; [`VantageError::Render`] if attaching fails, in
    /// which case the loop stays `Uninitialized`.
    pub fn start(&mut self, target: R::Target) -> Result<(), VantageError> {
        if self.loop_state != LoopState::Uninitialized {
            return Err(VantageError::InvalidTransition {
                state: self.loop_state,
                action: "start",
            });
        }
        self.renderer.attach(target)?;
        self.loop_state = LoopState::Running;
        self.pending_frame = Some(self.scheduler.request_frame());
        log::info!("render loop started");
        Ok(())
    }

    /// Cancel the outstanding frame request and stop for good.
    ///
    /// Calling this again, or before [`start`](Self::start), is harmless.
    pub fn stop(&mut self) {
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        if self.loop_state != LoopState::Stopped {
            log::info!("render loop stopped after {} frames", self.frames);
        }
        self.loop_state = LoopState::Stopped;
    }

    /// Frame callback.
    ///
    /// Requests the next frame before doing any work, so a failing frame
    /// cannot break the chain. Then: correct the camera FOV for the current
    /// viewport size, aim the camera at the focal point, advance tweens to
    /// `timestamp_ms`, render.
    ///
    /// Callbacks arriving while the loop is not running are ignored.
    ///
    /// # Errors
    ///
    /// Only under [`FrameErrorPolicy::Stop`]: the frame's error is returned
    /// after the loop has been stopped. Under
    /// [`FrameErrorPolicy::Continue`] failures are logged and skipped.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Result<(), VantageError> {
        if self.loop_state != LoopState::Running {
            log::debug!("frame at {timestamp_ms:.1}ms ignored: loop {}", self.loop_state);
            return Ok(());
        }
        self.pending_frame = Some(self.scheduler.request_frame());
        self.frames += 1;
        self.last_timestamp_ms = timestamp_ms;

        match self.draw_frame(timestamp_ms) {
            Ok(()) => Ok(()),
            Err(e) => match self.on_error {
                FrameErrorPolicy::Continue => {
                    log::warn!("frame {} skipped: {e}", self.frames);
                    Ok(())
                }
                FrameErrorPolicy::Stop => {
                    log::error!("frame {} failed: {e}", self.frames);
                    self.stop();
                    Err(e)
                }
            },
        }
    }

    fn draw_frame(&mut self, timestamp_ms: f64) -> Result<(), VantageError> {
        let size = self.viewport.size();
        let focus = self.focal_point();
        let (_, camera) = self.scene.camera_mut(self.handles.camera)?;
        let _ = self.state.correction().apply(camera, size)?;
        camera.look_at(focus);

        let _ = self.tweens.advance(timestamp_ms, &mut self.scene);
        self.renderer.render(&self.scene, self.handles.camera)?;
        Ok(())
    }

    /// Resize notification: re-read the viewport size, correct the camera
    /// and resize the renderer. The FOV baseline is not touched.
    ///
    /// # Errors
    ///
    /// [`VantageError::InvalidViewportDimensions`] for a zero-sized
    /// viewport; the previous size stays in effect.
    pub fn on_resize(&mut self) -> Result<(), VantageError> {
        let size = self.viewport.size();
        let (_, camera) = self.scene.camera_mut(self.handles.camera)?;
        let projection = self.state.correction().apply(camera, size)?;
        self.state.set_current(size);
        self.renderer.set_viewport_size(size.width, size.height);
        log::debug!(
            "resized to {size}: fov {:.2}° aspect {:.3}",
            projection.fov_degrees,
            projection.aspect
        );
        Ok(())
    }

    // ── Motion ───────────────────────────────────────────────────────────

    /// Tween moving the focal point onto the member named `target`, with
    /// the configured default duration and easing. Not started.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_focus(&self, target: &str) -> Result<Tween, VantageError> {
        self.move_member(self.handles.focal_point, target)
    }

    /// Tween moving the camera onto the member named `target`. Not started.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_camera(&self, target: &str) -> Result<Tween, VantageError> {
        self.move_member(self.handles.camera, target)
    }

    /// Tween moving the light onto the member named `target`. Not started.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_light(&self, target: &str) -> Result<Tween, VantageError> {
        self.move_member(self.handles.light, target)
    }

    /// [`move_focus`](Self::move_focus) with explicit duration and easing.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_focus_with(
        &self,
        target: &str,
        duration_ms: f64,
        easing: EasingFunction,
    ) -> Result<Tween, VantageError> {
        self.move_focus(target)
            .map(|t| t.with_duration_ms(duration_ms).with_easing(easing))
    }

    /// [`move_camera`](Self::move_camera) with explicit duration and easing.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_camera_with(
        &self,
        target: &str,
        duration_ms: f64,
        easing: EasingFunction,
    ) -> Result<Tween, VantageError> {
        self.move_camera(target)
            .map(|t| t.with_duration_ms(duration_ms).with_easing(easing))
    }

    /// [`move_light`](Self::move_light) with explicit duration and easing.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if `target` is not in the scene.
    pub fn move_light_with(
        &self,
        target: &str,
        duration_ms: f64,
        easing: EasingFunction,
    ) -> Result<Tween, VantageError> {
        self.move_light(target)
            .map(|t| t.with_duration_ms(duration_ms).with_easing(easing))
    }

    fn move_member(
        &self,
        subject: MemberId,
        target: &str,
    ) -> Result<Tween, VantageError> {
        let target = self.scene.find(target)?;
        Ok(Tween::toward(subject, target)
            .with_duration_ms(self.motion.duration_ms)
            .with_easing(self.motion.easing))
    }

    /// Start a tween in the group this controller advances each frame,
    /// timed from the latest frame timestamp.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if the tween's subject is not a
    /// member of this controller's scene.
    pub fn start_tween(&mut self, tween: Tween) -> Result<TweenId, VantageError> {
        self.tweens.start(tween, self.last_timestamp_ms, &self.scene)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The scene being rendered.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for host-driven edits between frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Handles of the four bound members.
    #[must_use]
    pub fn handles(&self) -> ResolvedHandles {
        self.handles
    }

    /// The bound camera.
    ///
    /// # Errors
    ///
    /// [`VantageError::UnexpectedMemberKind`] if the camera member was
    /// replaced by a non-camera through [`scene_mut`](Self::scene_mut).
    pub fn camera(&self) -> Result<&PerspectiveCamera, VantageError> {
        self.scene.camera(self.handles.camera).map(|(_, camera)| camera)
    }

    /// The tween group advanced each frame.
    #[must_use]
    pub fn tweens(&self) -> &TweenGroup {
        &self.tweens
    }

    /// Mutable tween group (to stop tweens).
    pub fn tweens_mut(&mut self) -> &mut TweenGroup {
        &mut self.tweens
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The viewport source.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable viewport source.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Current size and FOV baseline.
    #[must_use]
    pub fn viewport_state(&self) -> &ViewportState {
        &self.state
    }

    /// Lifecycle state.
    #[must_use]
    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Token of the frame request not yet delivered, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    /// Frames ticked while running (including skipped ones).
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timestamp of the most recent frame, in milliseconds.
    #[must_use]
    pub fn last_timestamp_ms(&self) -> f64 {
        self.last_timestamp_ms
    }

    fn focal_point(&self) -> Vec3 {
        self.scene
            .position(self.handles.focal_point)
            .unwrap_or(Vec3::ZERO)
    }
}
