use std::f32::consts::PI;

use super::CameraControl;
use crate::error::VantageError;
use crate::viewport::ViewportSize;

/// Multiplier on the reconstructed full angle.
const FOV_SCALE: f32 = 1.5;

/// Projection inputs derived for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Width / height.
    pub aspect: f32,
    /// Corrected vertical field of view in degrees.
    pub fov_degrees: f32,
}

/// Aspect-adaptive vertical FOV.
///
/// A vertical FOV fixed in degrees squashes or stretches the scene when the
/// viewport's aspect ratio changes. Instead, the baseline half-FOV tangent
/// and viewport height are captured once, and every later viewport derives
/// its vertical FOV from them:
///
/// ```text
/// aspect    = width / height
/// corrected = baseline_tangent * (height / baseline_height)
/// fov       = 1.5 * (360 / π) * atan(corrected) / sqrt(aspect)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovCorrection {
    baseline_height: f32,
    baseline_half_fov_tangent: f32,
}

impl FovCorrection {
    /// Capture the baseline from the camera's initial vertical FOV and the
    /// viewport height at startup.
    ///
    /// # Errors
    ///
    /// [`VantageError::InvalidViewportDimensions`] if `baseline.height` is 0.
    pub fn new(
        initial_fov_degrees: f32,
        baseline: ViewportSize,
    ) -> Result<Self, VantageError> {
        if baseline.height == 0 {
            return Err(baseline.invalid());
        }
        Ok(Self {
            baseline_height: baseline.height as f32,
            baseline_half_fov_tangent: (initial_fov_degrees.to_radians() / 2.0)
                .tan(),
        })
    }

    /// Viewport height captured at startup.
    #[must_use]
    pub fn baseline_height(&self) -> f32 {
        self.baseline_height
    }

    /// `tan(initial_fov / 2)`, captured at startup.
    #[must_use]
    pub fn baseline_half_fov_tangent(&self) -> f32 {
        self.baseline_half_fov_tangent
    }

    /// Derive aspect and vertical FOV for a viewport size.
    ///
    /// # Errors
    ///
    /// [`VantageError::InvalidViewportDimensions`] if either dimension is 0.
    pub fn project(&self, size: ViewportSize) -> Result<Projection, VantageError> {
        if !size.is_valid() {
            return Err(size.invalid());
        }
        let width = size.width as f32;
        let height = size.height as f32;

        let aspect = width / height;
        let corrected =
            self.baseline_half_fov_tangent * (height / self.baseline_height);
        let fov_degrees =
            FOV_SCALE * (360.0 / PI) * corrected.atan() / aspect.sqrt();

        Ok(Projection {
            aspect,
            fov_degrees,
        })
    }

    /// Derive the projection for `size` and push it into `camera`.
    ///
    /// # Errors
    ///
    /// Same as [`project`](Self::project); the camera is left untouched on
    /// error.
    pub fn apply<C: CameraControl + ?Sized>(
        &self,
        camera: &mut C,
        size: ViewportSize,
    ) -> Result<Projection, VantageError> {
        let projection = self.project(size)?;
        camera.set_aspect(projection.aspect);
        camera.set_fov_degrees(projection.fov_degrees);
        camera.recompute_projection();
        Ok(projection)
    }
}
