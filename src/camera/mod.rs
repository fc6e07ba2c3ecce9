//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera behind a small capability trait and the
//! adaptive field-of-view correction that keeps horizontal framing stable
//! across viewport aspect ratios.

/// Perspective camera and its control trait.
pub mod core;
/// Aspect-adaptive vertical field-of-view correction.
pub mod fov;

pub use self::core::{CameraControl, PerspectiveCamera};
pub use fov::{FovCorrection, Projection};
