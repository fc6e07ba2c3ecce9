use glam::{Mat4, Vec3};

/// Squared cross-product length below which the view direction counts as
/// parallel to `up`.
const PARALLEL_EPSILON: f32 = 1e-12;
/// Offset applied to a view direction that is parallel to `up`.
const NUDGE: f32 = 1e-4;

/// What the render loop needs from a camera.
pub trait CameraControl {
    /// Vertical field of view in degrees.
    fn fov_degrees(&self) -> f32;
    /// Set the vertical field of view in degrees.
    fn set_fov_degrees(&mut self, fov: f32);
    /// Viewport aspect ratio (width / height).
    fn aspect(&self) -> f32;
    /// Set the viewport aspect ratio.
    fn set_aspect(&mut self, aspect: f32);
    /// Aim the camera at a world-space point.
    fn look_at(&mut self, point: Vec3);
    /// Rebuild the projection matrix from the current FOV and aspect.
    fn recompute_projection(&mut self);
}

/// Perspective camera. The eye is supplied by the owning scene member's
/// position; the camera itself stores orientation and projection.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    /// Camera with the given vertical FOV, looking down -Z from the origin.
    #[must_use]
    pub fn new(fovy: f32) -> Self {
        let mut camera = Self {
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 1.0,
            fovy,
            znear: 0.1,
            zfar: 1000.0,
            projection: Mat4::IDENTITY,
        };
        camera.recompute_projection();
        camera
    }

    /// Override the clipping planes.
    #[must_use]
    pub fn with_clip(mut self, znear: f32, zfar: f32) -> Self {
        self.znear = znear;
        self.zfar = zfar;
        self.recompute_projection();
        self
    }

    /// Projection matrix as of the last
    /// [`recompute_projection`](CameraControl::recompute_projection).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// View matrix for a camera at `eye`.
    ///
    /// Degenerate poses still give a finite matrix: an eye on the target
    /// looks down -Z, and a view direction parallel to `up` is nudged off
    /// the up axis.
    #[must_use]
    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        let mut back = eye - self.target;
        if back.length_squared() == 0.0 {
            back = Vec3::Z;
        }
        back = back.normalize();

        let up = self.up.normalize_or(Vec3::Y);
        if up.cross(back).length_squared() < PARALLEL_EPSILON {
            if up.z.abs() > 1.0 - f32::EPSILON {
                back.x += NUDGE;
            } else {
                back.z += NUDGE;
            }
            back = back.normalize();
        }
        Mat4::look_to_rh(eye, -back, up)
    }

    /// Combined view-projection matrix for a camera at `eye`.
    #[must_use]
    pub fn view_projection(&self, eye: Vec3) -> Mat4 {
        self.projection * self.view_matrix(eye)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(45.0)
    }
}

impl CameraControl for PerspectiveCamera {
    fn fov_degrees(&self) -> f32 {
        self.fovy
    }

    fn set_fov_degrees(&mut self, fov: f32) {
        self.fovy = fov;
    }

    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    fn recompute_projection(&mut self) {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        self.projection = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_stale_until_recomputed() {
        let mut camera = PerspectiveCamera::new(50.0);
        let before = camera.projection();
        camera.set_fov_degrees(70.0);
        camera.set_aspect(2.0);
        assert_eq!(camera.projection(), before);
        camera.recompute_projection();
        assert_ne!(camera.projection(), before);
    }

    #[test]
    fn eye_on_target_gives_finite_view() {
        let mut camera = PerspectiveCamera::new(50.0);
        let eye = Vec3::new(0.0, 1.0, 0.0);
        camera.look_at(eye);
        let view = camera.view_matrix(eye);
        assert!(view.is_finite());
        // Falls back to looking down -Z.
        let ahead = view.transform_point3(eye - Vec3::Z);
        assert!(ahead.z < 0.0);
        assert!(camera.view_projection(eye).is_finite());
    }

    #[test]
    fn eye_straight_above_or_below_gives_finite_view() {
        let mut camera = PerspectiveCamera::new(50.0);
        let target = Vec3::new(0.0, 1.0, 0.0);
        camera.look_at(target);
        for eye in [Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -3.0, 0.0)] {
            let view_proj = camera.view_projection(eye);
            assert!(view_proj.is_finite(), "eye {eye}");
            let clip = view_proj.project_point3(target);
            assert!(clip.x.abs() < 1e-3 && clip.y.abs() < 1e-3, "eye {eye}");
        }
    }

    #[test]
    fn look_at_centres_target_in_clip_space() {
        let mut camera = PerspectiveCamera::new(60.0);
        let eye = Vec3::new(3.0, 2.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, -2.0);
        camera.look_at(target);
        let clip = camera.view_projection(eye).project_point3(target);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }
}
