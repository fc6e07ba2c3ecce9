use std::fmt;

use crate::camera::FovCorrection;
use crate::error::VantageError;

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Size from width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are non-zero.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub(crate) fn invalid(self) -> VantageError {
        VantageError::InvalidViewportDimensions {
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Current viewport size plus the baseline captured at startup.
///
/// Only resize handling changes `current`; the baseline inside
/// `correction` never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    current: ViewportSize,
    correction: FovCorrection,
}

impl ViewportState {
    pub(crate) fn new(current: ViewportSize, correction: FovCorrection) -> Self {
        Self {
            current,
            correction,
        }
    }

    /// Size as of the last resize (or construction).
    #[must_use]
    pub fn current(&self) -> ViewportSize {
        self.current
    }

    /// The FOV correction holding the baseline.
    #[must_use]
    pub fn correction(&self) -> &FovCorrection {
        &self.correction
    }

    /// Viewport height captured at startup.
    #[must_use]
    pub fn baseline_height(&self) -> f32 {
        self.correction.baseline_height()
    }

    /// `tan(initial_fov / 2)` captured at startup.
    #[must_use]
    pub fn baseline_half_fov_tangent(&self) -> f32 {
        self.correction.baseline_half_fov_tangent()
    }

    pub(crate) fn set_current(&mut self, size: ViewportSize) {
        self.current = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_validity() {
        assert!(ViewportSize::new(800, 600).is_valid());
        assert!(!ViewportSize::new(0, 600).is_valid());
        assert!(!ViewportSize::new(800, 0).is_valid());
        assert_eq!(ViewportSize::new(1024, 768).to_string(), "1024x768");
    }
}
