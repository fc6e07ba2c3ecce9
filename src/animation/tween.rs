//! Position tweens: an unstarted description of one member's move.

use glam::Vec3;

use super::easing::EasingFunction;
use crate::scene::{MemberId, Scene};

/// Default tween length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Where a tween ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// Another member's position, re-read on every advance so a moving
    /// destination is tracked until the tween completes.
    Member(MemberId),
    /// A fixed world-space point.
    Point(Vec3),
}

impl Destination {
    /// Resolve to a world-space point against `scene`.
    #[must_use]
    pub fn resolve(&self, scene: &Scene) -> Option<Vec3> {
        match *self {
            Self::Member(id) => scene.position(id),
            Self::Point(point) => Some(point),
        }
    }
}

/// Unstarted interpolation of one member's position toward a destination.
///
/// Built by the viewport's motion helpers and handed to
/// [`TweenGroup::start`](super::TweenGroup::start), which captures the
/// subject's position at that moment as the start value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    subject: MemberId,
    destination: Destination,
    duration_ms: f64,
    delay_ms: f64,
    easing: EasingFunction,
}

impl Tween {
    /// Move `subject` to `destination` over the default duration with the
    /// default easing.
    #[must_use]
    pub fn new(subject: MemberId, destination: Destination) -> Self {
        Self {
            subject,
            destination,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0.0,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Move `subject` onto another member's position.
    #[must_use]
    pub fn toward(subject: MemberId, target: MemberId) -> Self {
        Self::new(subject, Destination::Member(target))
    }

    /// Move `subject` to a fixed point.
    #[must_use]
    pub fn to_point(subject: MemberId, point: Vec3) -> Self {
        Self::new(subject, Destination::Point(point))
    }

    /// Set the duration. Negative values are treated as zero.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Hold the subject still for `delay_ms` after starting.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// The member being moved.
    #[must_use]
    pub fn subject(&self) -> MemberId {
        self.subject
    }

    /// Where the member is moving to.
    #[must_use]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Length of the move in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Start delay in milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Easing curve.
    #[must_use]
    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    /// Normalized progress at `now_ms` for a tween started at `start_ms`.
    ///
    /// Returns `None` while still inside the start delay.
    pub(crate) fn progress(&self, start_ms: f64, now_ms: f64) -> Option<f32> {
        let begin = start_ms + self.delay_ms;
        if now_ms < begin {
            return None;
        }
        if self.duration_ms <= 0.0 {
            return Some(1.0);
        }
        Some(((now_ms - begin) / self.duration_ms).min(1.0) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;

    #[test]
    fn defaults_match_motion_policy() {
        let t = Tween::to_point(MemberId(0), Vec3::ONE);
        assert_eq!(t.duration_ms(), 1000.0);
        assert_eq!(t.easing(), EasingFunction::QuadraticInOut);
        assert_eq!(t.delay_ms(), 0.0);
    }

    #[test]
    fn builder_overrides() {
        let t = Tween::toward(MemberId(0), MemberId(1))
            .with_duration_ms(250.0)
            .with_easing(EasingFunction::Linear)
            .with_delay_ms(-5.0);
        assert_eq!(t.duration_ms(), 250.0);
        assert_eq!(t.easing(), EasingFunction::Linear);
        assert_eq!(t.delay_ms(), 0.0);
        assert_eq!(t.destination(), Destination::Member(MemberId(1)));
    }

    #[test]
    fn progress_respects_delay_and_clamps() {
        let t = Tween::to_point(MemberId(0), Vec3::ONE)
            .with_duration_ms(100.0)
            .with_delay_ms(50.0);
        assert_eq!(t.progress(1000.0, 1020.0), None);
        assert_eq!(t.progress(1000.0, 1050.0), Some(0.0));
        assert_eq!(t.progress(1000.0, 1100.0), Some(0.5));
        assert_eq!(t.progress(1000.0, 5000.0), Some(1.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let t = Tween::to_point(MemberId(0), Vec3::ONE).with_duration_ms(0.0);
        assert_eq!(t.progress(10.0, 10.0), Some(1.0));
    }

    #[test]
    fn member_destination_resolves_live_position() {
        let mut scene = Scene::new();
        let a = scene.add(SceneNode::empty("a", Vec3::ZERO));
        let dest = Destination::Member(a);
        assert_eq!(dest.resolve(&scene), Some(Vec3::ZERO));
        let _ = scene.set_position(a, Vec3::X);
        assert_eq!(dest.resolve(&scene), Some(Vec3::X));
        assert_eq!(Destination::Member(MemberId(7)).resolve(&scene), None);
    }
}
