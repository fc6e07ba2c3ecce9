//! Easing functions for animation interpolation.
//!
//! Provides the easing curves used to shape tween progress. All functions
//! map `[0, 1]` onto `[0, 1]` with fixed endpoints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out (slow start and end, fast middle).
    QuadraticInOut,
    /// Cubic ease-in-out.
    CubicInOut,
    /// Sinusoidal ease-in-out.
    SineInOut,
    /// Square root ease-out (fast start, gradual slow).
    SqrtOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing for camera, light and focus moves.
    pub const DEFAULT: EasingFunction = EasingFunction::QuadraticInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        // Clamp input to [0, 1]
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let k = 2.0 * t - 1.0;
                    -0.5 * (k * (k - 2.0) - 1.0)
                }
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = 2.0 * t - 2.0;
                    0.5 * k * k * k + 1.0
                }
            }
            EasingFunction::SineInOut => {
                0.5 * (1.0 - (std::f32::consts::PI * t).cos())
            }
            EasingFunction::SqrtOut => t.sqrt(),
            EasingFunction::CubicHermite { c1, c2 } => {
                // f(t) = c0(1-t)³ + c1·3t(1-t)² + c2·3(1-t)t² + c3·t³
                // where c0=0.0, c3=1.0
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 8] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::QuadraticInOut,
        EasingFunction::CubicInOut,
        EasingFunction::SineInOut,
        EasingFunction::SqrtOut,
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 },
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let in_out = EasingFunction::QuadraticInOut;
        assert_eq!(in_out.evaluate(-3.0), 0.0);
        assert_eq!(in_out.evaluate(7.0), 1.0);
    }

    #[test]
    fn test_quadratic_in_out() {
        let f = EasingFunction::QuadraticInOut;
        assert_eq!(f.evaluate(0.25), 0.125);
        assert_eq!(f.evaluate(0.5), 0.5);
        assert_eq!(f.evaluate(0.75), 0.875);
    }

    #[test]
    fn in_out_curves_are_symmetric() {
        for easing in [
            EasingFunction::QuadraticInOut,
            EasingFunction::CubicInOut,
            EasingFunction::SineInOut,
        ] {
            for t in [0.1, 0.2, 0.3, 0.4] {
                let sum = easing.evaluate(t) + easing.evaluate(1.0 - t);
                assert!((sum - 1.0).abs() < 1e-5, "{easing:?} at {t}");
            }
        }
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
    }

    #[test]
    fn test_cubic_hermite_ease_out_shape() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert!(hermite.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_default_is_quadratic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticInOut);
    }
}
