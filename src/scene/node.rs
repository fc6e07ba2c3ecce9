use glam::Vec3;

use super::{Named, Positionable};
use crate::camera::PerspectiveCamera;

/// Point/directional light source parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Whether this light renders into the shadow map.
    pub casts_shadow: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            casts_shadow: true,
        }
    }
}

/// Renderable model (the geometry itself lives with the renderer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// Whether the model occludes lights.
    pub cast_shadow: bool,
    /// Whether the model shows shadows cast onto it.
    pub receive_shadow: bool,
}

/// What a scene member is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Perspective camera; the member's position is the eye.
    Camera(PerspectiveCamera),
    /// Light source.
    Light(Light),
    /// Renderable model.
    Model(Model),
    /// Marker with a position only (focal points, waypoints).
    Empty,
}

/// One top-level member of a [`Scene`](super::Scene).
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Lookup name. Not required to be unique.
    pub name: String,
    /// World-space position.
    pub position: Vec3,
    /// Node payload.
    pub kind: NodeKind,
}

impl SceneNode {
    /// Member of any kind.
    pub fn new(name: impl Into<String>, position: Vec3, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            position,
            kind,
        }
    }

    /// Camera member.
    pub fn camera(
        name: impl Into<String>,
        position: Vec3,
        camera: PerspectiveCamera,
    ) -> Self {
        Self::new(name, position, NodeKind::Camera(camera))
    }

    /// Light member.
    pub fn light(name: impl Into<String>, position: Vec3, light: Light) -> Self {
        Self::new(name, position, NodeKind::Light(light))
    }

    /// Model member.
    pub fn model(name: impl Into<String>, position: Vec3, model: Model) -> Self {
        Self::new(name, position, NodeKind::Model(model))
    }

    /// Position-only marker.
    pub fn empty(name: impl Into<String>, position: Vec3) -> Self {
        Self::new(name, position, NodeKind::Empty)
    }
}

impl Named for SceneNode {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Positionable for SceneNode {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
