//! End-to-end render loop runs against the headless backend.

#![allow(clippy::unwrap_used, clippy::panic)]

use glam::Vec3;
use vantage::{
    animation::EasingFunction,
    camera::PerspectiveCamera,
    options::{FrameErrorPolicy, Options},
    render::{
        ClearColor, HeadlessRenderer, RenderError, Renderer, ShadowConfig,
    },
    scene::{Light, MemberId, Model, Scene, SceneNode},
    viewport::{FixedViewport, LoopState, ManualScheduler, ViewportController},
    VantageError,
};

fn room() -> Scene {
    Scene::new()
        .with(SceneNode::camera(
            "renderCam",
            Vec3::new(0.0, 1.6, 6.0),
            PerspectiveCamera::new(50.0),
        ))
        .with(SceneNode::light(
            "lightSource",
            Vec3::new(2.0, 4.0, 2.0),
            Light::default(),
        ))
        .with(SceneNode::model("roomModel", Vec3::ZERO, Model::default()))
        .with(SceneNode::empty("focalPoint", Vec3::new(0.0, 1.0, 0.0)))
        .with(SceneNode::empty("desk", Vec3::new(-2.0, 0.8, -2.0)))
}

fn headless(
    width: u32,
    height: u32,
) -> ViewportController<HeadlessRenderer, FixedViewport, ManualScheduler> {
    let mut controller = ViewportController::new(
        room(),
        HeadlessRenderer::new(),
        FixedViewport::new(width, height),
        ManualScheduler::new(),
        &Options::default(),
    )
    .unwrap();
    controller.start("#display".to_owned()).unwrap();
    controller
}

/// Backend whose every frame fails.
#[derive(Default)]
struct FailingRenderer {
    attempts: u32,
}

impl Renderer for FailingRenderer {
    type Target = ();

    fn set_viewport_size(&mut self, _width: u32, _height: u32) {}
    fn set_output_scaling(&mut self, _ratio: f64) {}
    fn set_background_color(&mut self, _color: ClearColor) {}
    fn configure_shadows(&mut self, _shadows: ShadowConfig) {}

    fn attach(&mut self, _target: ()) -> Result<(), RenderError> {
        Ok(())
    }

    fn render(&mut self, _scene: &Scene, _camera: MemberId) -> Result<(), RenderError> {
        self.attempts += 1;
        Err(RenderError::Backend("device lost".into()))
    }
}

fn failing(
    policy: FrameErrorPolicy,
) -> ViewportController<FailingRenderer, FixedViewport, ManualScheduler> {
    let mut options = Options::default();
    options.frame_loop.on_error = policy;
    let mut controller = ViewportController::new(
        room(),
        FailingRenderer::default(),
        FixedViewport::new(800, 600),
        ManualScheduler::new(),
        &options,
    )
    .unwrap();
    controller.start(()).unwrap();
    controller
}

#[test]
fn each_tick_requests_exactly_one_frame() {
    let mut c = headless(800, 600);
    assert_eq!(c.scheduler().requested(), 1);

    for i in 1..=5u32 {
        let fired = c.scheduler_mut().fire();
        assert!(fired.is_some());
        c.on_frame(f64::from(i) * 16.0).unwrap();
        assert_eq!(c.scheduler().pending(), 1);
        assert_eq!(c.scheduler().requested(), u64::from(i) + 1);
    }
    assert_eq!(c.renderer().frames_rendered(), 5);
    assert_eq!(c.frames(), 5);
}

#[test]
fn tick_after_resize_uses_new_fov() {
    let mut c = headless(800, 800);
    c.on_frame(16.0).unwrap();
    let square = c.renderer().last_frame().unwrap().fov_degrees;
    assert!((square - 75.0).abs() < 1e-3);

    // The frame re-reads the viewport even before the host reports the
    // resize.
    c.viewport_mut().resize(1600, 800);
    c.on_frame(32.0).unwrap();
    let frame = c.renderer().last_frame().unwrap();
    assert_eq!(frame.aspect, 2.0);
    assert!((frame.fov_degrees - 75.0 / 2f32.sqrt()).abs() < 1e-3);
}

#[test]
fn resize_notification_reaches_renderer() {
    let mut c = headless(800, 600);
    c.viewport_mut().resize(1024, 768);
    c.on_resize().unwrap();
    c.on_frame(16.0).unwrap();
    assert_eq!(c.renderer().size(), (1024, 768));
    assert_eq!(c.renderer().last_frame().unwrap().physical_size, (1024, 768));
}

#[test]
fn on_resize_then_tick_renders_with_new_fov() {
    let mut c = headless(800, 800);
    c.on_frame(16.0).unwrap();

    c.viewport_mut().resize(1600, 800);
    c.on_resize().unwrap();
    c.on_frame(32.0).unwrap();
    let frame = c.renderer().last_frame().unwrap();
    assert_eq!(frame.aspect, 2.0);
    assert!((frame.fov_degrees - 75.0 / 2f32.sqrt()).abs() < 1e-3);

    // Taller than the baseline: the height ratio feeds the tangent.
    c.viewport_mut().resize(800, 1600);
    c.on_resize().unwrap();
    c.on_frame(48.0).unwrap();
    let frame = c.renderer().last_frame().unwrap();
    let expected = 1.5 * (360.0 / std::f32::consts::PI)
        * (25f32.to_radians().tan() * 2.0).atan()
        / 0.5f32.sqrt();
    assert_eq!(frame.aspect, 0.5);
    assert!((frame.fov_degrees - expected).abs() < 1e-3);
}

#[test]
fn degenerate_camera_poses_render_finite_frames() {
    let mut c = headless(800, 600);
    let _ = c
        .scene_mut()
        .add(SceneNode::empty("ceiling", Vec3::new(0.0, 3.0, 0.0)));
    c.on_frame(0.0).unwrap();

    // Eye on the focal point.
    let tween = c
        .move_camera_with("focalPoint", 0.0, EasingFunction::Linear)
        .unwrap();
    let _ = c.start_tween(tween).unwrap();
    c.on_frame(16.0).unwrap();
    c.on_frame(32.0).unwrap();
    let frame = c.renderer().last_frame().unwrap();
    assert_eq!(frame.eye, Vec3::new(0.0, 1.0, 0.0));
    assert!(frame.view_proj.is_finite());
    assert!(frame.member("roomModel").unwrap().ndc.is_finite());
    assert!(frame.members.iter().all(|m| m.ndc.is_finite()));

    // Eye straight above the focal point, looking along -up.
    let tween = c
        .move_camera_with("ceiling", 0.0, EasingFunction::Linear)
        .unwrap();
    let _ = c.start_tween(tween).unwrap();
    c.on_frame(48.0).unwrap();
    c.on_frame(64.0).unwrap();
    let frame = c.renderer().last_frame().unwrap();
    assert_eq!(frame.eye, Vec3::new(0.0, 3.0, 0.0));
    assert!(frame.view_proj.is_finite());
    let room = frame.member("roomModel").unwrap();
    assert!(room.ndc.is_finite());
    assert!(room.visible);
}

#[test]
fn stop_policy_ends_the_loop_on_failure() {
    let mut c = failing(FrameErrorPolicy::Stop);
    let _ = c.scheduler_mut().fire();
    let err = c.on_frame(16.0).unwrap_err();
    assert!(matches!(err, VantageError::Render(RenderError::Backend(_))));
    assert_eq!(c.loop_state(), LoopState::Stopped);
    assert_eq!(c.scheduler().pending(), 0);

    c.on_frame(32.0).unwrap();
    assert_eq!(c.renderer().attempts, 1);
}

#[test]
fn continue_policy_skips_failed_frames() {
    let mut c = failing(FrameErrorPolicy::Continue);
    for i in 1..=3u32 {
        let _ = c.scheduler_mut().fire();
        c.on_frame(f64::from(i) * 16.0).unwrap();
    }
    assert_eq!(c.loop_state(), LoopState::Running);
    assert_eq!(c.renderer().attempts, 3);
    // The chain survives: one follow-up frame is still pending.
    assert_eq!(c.scheduler().pending(), 1);
}

#[test]
fn camera_tween_reaches_target_over_ticks() {
    let mut c = headless(800, 600);
    c.on_frame(0.0).unwrap();

    let tween = c.move_camera("desk").unwrap();
    let _ = c.start_tween(tween).unwrap();
    let camera = c.handles().camera;
    let start = c.scene().position(camera).unwrap();

    c.on_frame(500.0).unwrap();
    let midway = c.scene().position(camera).unwrap();
    let desk = Vec3::new(-2.0, 0.8, -2.0);
    // QuadraticInOut is exactly half way at half time.
    assert!(midway.distance(start.lerp(desk, 0.5)) < 1e-4);

    c.on_frame(1000.0).unwrap();
    assert!(c.scene().position(camera).unwrap().distance(desk) < 1e-5);
    assert!(c.tweens().is_empty());

    // The camera keeps looking at the focal point while it moves.
    assert_eq!(c.camera().unwrap().target, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn missing_light_is_fatal_at_construction() {
    let scene = Scene::new()
        .with(SceneNode::camera(
            "renderCam",
            Vec3::ZERO,
            PerspectiveCamera::new(50.0),
        ))
        .with(SceneNode::model("roomModel", Vec3::ZERO, Model::default()))
        .with(SceneNode::empty("focalPoint", Vec3::ZERO));
    let result = ViewportController::new(
        scene,
        HeadlessRenderer::new(),
        FixedViewport::new(800, 600),
        ManualScheduler::new(),
        &Options::default(),
    );
    let Err(VantageError::MissingSceneMember(names)) = result else {
        panic!("expected MissingSceneMember");
    };
    assert_eq!(names, vec!["lightSource".to_owned()]);
}

#[test]
fn options_from_toml_drive_the_controller() {
    let options = Options::from_toml(
        r#"
        [scene]
        camera = "eye"

        [motion]
        duration_ms = 250.0
        easing = "linear"
        "#,
    )
    .unwrap();
    let scene = Scene::new()
        .with(SceneNode::camera("eye", Vec3::Z, PerspectiveCamera::new(50.0)))
        .with(SceneNode::light("lightSource", Vec3::ONE, Light::default()))
        .with(SceneNode::model("roomModel", Vec3::ZERO, Model::default()))
        .with(SceneNode::empty("focalPoint", Vec3::ZERO));
    let c = ViewportController::new(
        scene,
        HeadlessRenderer::new(),
        FixedViewport::new(640, 480),
        ManualScheduler::new(),
        &options,
    )
    .unwrap();
    let tween = c.move_camera("focalPoint").unwrap();
    assert_eq!(tween.duration_ms(), 250.0);
    assert_eq!(c.handles().camera.index(), 0);
}
