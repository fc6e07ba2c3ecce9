//! Demo viewer: a small furnished room with a camera tour on the number
//! keys.
//!
//! Usage: `vantage [options.toml]`

use std::path::Path;

use glam::Vec3;
use vantage::{
    camera::PerspectiveCamera,
    options::{Options, TourStop},
    scene::{Light, Model, Scene, SceneNode},
    VantageError, Viewer,
};

fn demo_room() -> Scene {
    Scene::new()
        .with(SceneNode::camera(
            "renderCam",
            Vec3::new(0.0, 1.6, 6.0),
            PerspectiveCamera::new(50.0).with_clip(0.05, 200.0),
        ))
        .with(SceneNode::light(
            "lightSource",
            Vec3::new(2.0, 4.0, 2.0),
            Light::default(),
        ))
        .with(SceneNode::model("roomModel", Vec3::ZERO, Model::default()))
        .with(SceneNode::empty("focalPoint", Vec3::new(0.0, 1.0, 0.0)))
        // Waypoints for the tour
        .with(SceneNode::empty("entrance", Vec3::new(0.0, 1.6, 6.0)))
        .with(SceneNode::empty("roomCenter", Vec3::new(0.0, 1.0, 0.0)))
        .with(SceneNode::empty("windowSeat", Vec3::new(-3.0, 1.2, 2.0)))
        .with(SceneNode::empty("bookshelf", Vec3::new(3.0, 1.5, -2.0)))
        .with(SceneNode::empty("desk", Vec3::new(-2.0, 0.8, -2.0)))
        .with(SceneNode::empty("cornerView", Vec3::new(4.0, 2.5, 4.0)))
        .with(SceneNode::empty("ceilingLamp", Vec3::new(0.0, 3.0, 0.0)))
}

fn stop(camera: &str, focus: &str, light: Option<&str>) -> TourStop {
    TourStop {
        camera: Some(camera.to_owned()),
        focus: Some(focus.to_owned()),
        light: light.map(str::to_owned),
    }
}

fn demo_tour() -> Vec<TourStop> {
    vec![
        stop("entrance", "roomCenter", None),
        stop("cornerView", "desk", Some("ceilingLamp")),
        stop("windowSeat", "bookshelf", None),
        stop("desk", "windowSeat", Some("cornerView")),
    ]
}

fn main() -> Result<(), VantageError> {
    env_logger::init();

    let mut options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    if options.tour.stops.is_empty() {
        options.tour.stops = demo_tour();
    }

    Viewer::builder()
        .with_scene(demo_room())
        .with_options(options)
        .with_title("Vantage")
        .build()
        .run()
}
