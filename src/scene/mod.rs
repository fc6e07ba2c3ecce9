//! Flat scene graph of named, positioned members.
//!
//! A [`Scene`] owns an ordered list of top-level [`SceneNode`]s. Everything
//! else in the crate refers to members through [`MemberId`] handles, which
//! stay valid for the lifetime of the scene because members are never
//! removed.

/// Name-based member lookup and required-role binding.
pub mod binder;
mod node;

use glam::Vec3;

pub use binder::{BindingNames, ResolvedHandles, SceneBinder};
pub use node::{Light, Model, NodeKind, SceneNode};

use crate::camera::PerspectiveCamera;
use crate::error::VantageError;

/// Anything that carries a lookup name.
pub trait Named {
    /// The member's name.
    fn name(&self) -> &str;
}

/// Anything with a mutable world-space position.
pub trait Positionable {
    /// Current world-space position.
    fn position(&self) -> Vec3;
    /// Move to a new world-space position.
    fn set_position(&mut self, position: Vec3);
}

/// A top-level scene member: named and positioned.
pub trait SceneMember: Named + Positionable {}

impl<T: Named + Positionable> SceneMember for T {}

/// Handle to a member of a [`Scene`] (its index in insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub(crate) usize);

impl MemberId {
    /// Position of the member in the scene's member list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered collection of top-level scene members.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    members: Vec<SceneNode>,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member and return its handle.
    pub fn add(&mut self, node: SceneNode) -> MemberId {
        self.members.push(node);
        MemberId(self.members.len() - 1)
    }

    /// Builder-style [`add`](Self::add) for assembling scenes inline.
    #[must_use]
    pub fn with(mut self, node: SceneNode) -> Self {
        let _ = self.add(node);
        self
    }

    /// All members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[SceneNode] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the scene has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member behind a handle, if the handle belongs to this scene.
    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&SceneNode> {
        self.members.get(id.0)
    }

    /// Mutable member behind a handle.
    pub fn get_mut(&mut self, id: MemberId) -> Option<&mut SceneNode> {
        self.members.get_mut(id.0)
    }

    /// First member with exactly this name.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if no member has the name.
    pub fn find(&self, name: &str) -> Result<MemberId, VantageError> {
        SceneBinder::find_member_by_name(&self.members, name)
    }

    /// Position of a member, or `None` for a foreign handle.
    #[must_use]
    pub fn position(&self, id: MemberId) -> Option<Vec3> {
        self.get(id).map(Positionable::position)
    }

    /// Move a member. Returns `false` for a foreign handle.
    pub fn set_position(&mut self, id: MemberId, position: Vec3) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.set_position(position);
        true
    }

    /// The camera payload of a member.
    ///
    /// # Errors
    ///
    /// [`VantageError::UnexpectedMemberKind`] if the member is not a camera,
    /// [`VantageError::MissingSceneMember`] for a foreign handle.
    pub fn camera(
        &self,
        id: MemberId,
    ) -> Result<(&SceneNode, &PerspectiveCamera), VantageError> {
        let node = self.get(id).ok_or_else(|| foreign_handle(id))?;
        match &node.kind {
            NodeKind::Camera(camera) => Ok((node, camera)),
            _ => Err(not_a_camera(node)),
        }
    }

    /// Mutable camera payload of a member, with the member's position.
    ///
    /// # Errors
    ///
    /// Same as [`camera`](Self::camera).
    pub fn camera_mut(
        &mut self,
        id: MemberId,
    ) -> Result<(Vec3, &mut PerspectiveCamera), VantageError> {
        let SceneNode {
            name,
            position,
            kind,
            ..
        } = self.get_mut(id).ok_or_else(|| foreign_handle(id))?;
        match kind {
            NodeKind::Camera(camera) => Ok((*position, camera)),
            _ => Err(VantageError::UnexpectedMemberKind {
                name: name.clone(),
                expected: "camera",
            }),
        }
    }
}

fn foreign_handle(id: MemberId) -> VantageError {
    VantageError::MissingSceneMember(vec![format!("#{}", id.0)])
}

fn not_a_camera(node: &SceneNode) -> VantageError {
    VantageError::UnexpectedMemberKind {
        name: node.name.clone(),
        expected: "camera",
    }
}
