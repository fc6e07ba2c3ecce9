use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MemberId, Named};
use crate::error::VantageError;

/// Names of the four members every room scene must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct BindingNames {
    /// Member holding the render camera.
    pub camera: String,
    /// Member holding the key light.
    pub light: String,
    /// Member holding the room model.
    pub room: String,
    /// Member the camera is aimed at every frame.
    pub focal_point: String,
}

impl Default for BindingNames {
    fn default() -> Self {
        Self {
            camera: "renderCam".to_owned(),
            light: "lightSource".to_owned(),
            room: "roomModel".to_owned(),
            focal_point: "focalPoint".to_owned(),
        }
    }
}

/// Handles to the four required members. Always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedHandles {
    /// Render camera.
    pub camera: MemberId,
    /// Key light.
    pub light: MemberId,
    /// Room model.
    pub room: MemberId,
    /// Focal point the camera tracks.
    pub focal_point: MemberId,
}

/// Resolves members of a flat, ordered member list by exact name.
///
/// Lookup is a linear scan and the first member whose name matches wins.
/// Scenes with duplicate names therefore bind to whichever duplicate was
/// added first.
pub struct SceneBinder;

impl SceneBinder {
    /// Find the first member named `name`.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if nothing matches.
    pub fn find_member_by_name<M: Named>(
        members: &[M],
        name: &str,
    ) -> Result<MemberId, VantageError> {
        members
            .iter()
            .position(|member| member.name() == name)
            .map(MemberId)
            .ok_or_else(|| VantageError::MissingSceneMember(vec![name.to_owned()]))
    }

    /// Bind all four required roles.
    ///
    /// Either every role resolves or none does: the error lists every name
    /// that was missing, not just the first.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] naming each absent member.
    pub fn resolve<M: Named>(
        members: &[M],
        names: &BindingNames,
    ) -> Result<ResolvedHandles, VantageError> {
        let lookup = |name: &str| {
            members
                .iter()
                .position(|member| member.name() == name)
                .map(MemberId)
        };

        let camera = lookup(&names.camera);
        let light = lookup(&names.light);
        let room = lookup(&names.room);
        let focal_point = lookup(&names.focal_point);

        match (camera, light, room, focal_point) {
            (Some(camera), Some(light), Some(room), Some(focal_point)) => {
                let handles = ResolvedHandles {
                    camera,
                    light,
                    room,
                    focal_point,
                };
                log::debug!("bound scene roles: {handles:?}");
                Ok(handles)
            }
            (camera, light, room, focal_point) => {
                let missing: Vec<String> = [
                    (camera, &names.camera),
                    (light, &names.light),
                    (room, &names.room),
                    (focal_point, &names.focal_point),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.clone())
                .collect();
                Err(VantageError::MissingSceneMember(missing))
            }
        }
    }
}
