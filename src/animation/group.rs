//! The animation system: owns started tweens and advances them per frame.

use glam::Vec3;

use super::tween::Tween;
use crate::error::VantageError;
use crate::scene::Scene;

/// Handle to a started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

/// A tween plus the state captured when it was started.
#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    tween: Tween,
    start_ms: f64,
    from: Vec3,
}

/// Set of in-flight tweens, advanced together by timestamp.
///
/// Tweens are updated in the order they were started, so when two tweens
/// drive the same member the later one wins for that frame.
#[derive(Debug, Default)]
pub struct TweenGroup {
    active: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenGroup {
    /// Empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween at `now_ms`, capturing the subject's current position
    /// as the start value.
    ///
    /// # Errors
    ///
    /// [`VantageError::MissingSceneMember`] if the subject is not a member of
    /// `scene`.
    pub fn start(
        &mut self,
        tween: Tween,
        now_ms: f64,
        scene: &Scene,
    ) -> Result<TweenId, VantageError> {
        let from = scene.position(tween.subject()).ok_or_else(|| {
            VantageError::MissingSceneMember(vec![format!(
                "#{}",
                tween.subject().index()
            )])
        })?;

        let id = TweenId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "tween {id:?} started at {now_ms:.1}ms: member #{} from {from} over {}ms",
            tween.subject().index(),
            tween.duration_ms()
        );
        self.active.push(ActiveTween {
            id,
            tween,
            start_ms: now_ms,
            from,
        });
        Ok(id)
    }

    /// Drive every active tween to `now_ms`, writing positions into `scene`.
    ///
    /// Finished tweens are dropped after their final write. A tween whose
    /// destination member no longer resolves is dropped without moving.
    /// Returns the number of tweens still running.
    pub fn advance(&mut self, now_ms: f64, scene: &mut Scene) -> usize {
        self.active.retain(|active| {
            let Some(t) = active.tween.progress(active.start_ms, now_ms) else {
                return true;
            };
            let Some(to) = active.tween.destination().resolve(scene) else {
                log::warn!("tween {:?} lost its destination", active.id);
                return false;
            };
            let position = if t >= 1.0 {
                to
            } else {
                active.from.lerp(to, active.tween.easing().evaluate(t))
            };
            let _ = scene.set_position(active.tween.subject(), position);
            if t >= 1.0 {
                log::debug!("tween {:?} complete", active.id);
                false
            } else {
                true
            }
        });
        self.active.len()
    }

    /// Stop a tween where it is. Returns `false` if it was not running.
    pub fn stop(&mut self, id: TweenId) -> bool {
        let before = self.active.len();
        self.active.retain(|active| active.id != id);
        self.active.len() != before
    }

    /// Stop every tween.
    pub fn stop_all(&mut self) {
        self.active.clear();
    }

    /// Whether `id` is still running.
    #[must_use]
    pub fn is_active(&self, id: TweenId) -> bool {
        self.active.iter().any(|active| active.id == id)
    }

    /// Number of running tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;
    use crate::scene::{MemberId, SceneNode};

    fn scene() -> (Scene, MemberId, MemberId) {
        let mut scene = Scene::new();
        let mover = scene.add(SceneNode::empty("mover", Vec3::ZERO));
        let target =
            scene.add(SceneNode::empty("target", Vec3::new(10.0, 0.0, 0.0)));
        (scene, mover, target)
    }

    #[test]
    fn linear_tween_reaches_target_and_finishes() {
        let (mut scene, mover, target) = scene();
        let mut group = TweenGroup::new();
        let id = group
            .start(
                Tween::toward(mover, target)
                    .with_duration_ms(100.0)
                    .with_easing(EasingFunction::Linear),
                0.0,
                &scene,
            )
            .unwrap();

        assert_eq!(group.advance(50.0, &mut scene), 1);
        assert_eq!(scene.position(mover), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert!(group.is_active(id));

        assert_eq!(group.advance(100.0, &mut scene), 0);
        assert_eq!(scene.position(mover), Some(Vec3::new(10.0, 0.0, 0.0)));
        assert!(!group.is_active(id));
    }

    #[test]
    fn default_easing_is_slow_at_the_ends() {
        let (mut scene, mover, target) = scene();
        let mut group = TweenGroup::new();
        let _ = group
            .start(Tween::toward(mover, target), 0.0, &scene)
            .unwrap();
        let _ = group.advance(250.0, &mut scene);
        // QuadraticInOut at t = 0.25 is 0.125.
        assert_eq!(scene.position(mover), Some(Vec3::new(1.25, 0.0, 0.0)));
    }

    #[test]
    fn start_captures_position_at_start_time() {
        let (mut scene, mover, target) = scene();
        let _ = scene.set_position(mover, Vec3::new(2.0, 0.0, 0.0));
        let mut group = TweenGroup::new();
        let _ = group
            .start(
                Tween::toward(mover, target)
                    .with_duration_ms(100.0)
                    .with_easing(EasingFunction::Linear),
                0.0,
                &scene,
            )
            .unwrap();
        let _ = group.advance(50.0, &mut scene);
        assert_eq!(scene.position(mover), Some(Vec3::new(6.0, 0.0, 0.0)));
    }

    #[test]
    fn moving_destination_is_tracked() {
        let (mut scene, mover, target) = scene();
        let mut group = TweenGroup::new();
        let _ = group
            .start(
                Tween::toward(mover, target)
                    .with_duration_ms(100.0)
                    .with_easing(EasingFunction::Linear),
                0.0,
                &scene,
            )
            .unwrap();
        let _ = scene.set_position(target, Vec3::new(0.0, 20.0, 0.0));
        let _ = group.advance(100.0, &mut scene);
        assert_eq!(scene.position(mover), Some(Vec3::new(0.0, 20.0, 0.0)));
    }

    #[test]
    fn delayed_tween_holds_until_delay_elapses() {
        let (mut scene, mover, target) = scene();
        let mut group = TweenGroup::new();
        let _ = group
            .start(
                Tween::toward(mover, target)
                    .with_duration_ms(100.0)
                    .with_delay_ms(100.0),
                1000.0,
                &scene,
            )
            .unwrap();
        assert_eq!(group.advance(1050.0, &mut scene), 1);
        assert_eq!(scene.position(mover), Some(Vec3::ZERO));
        assert_eq!(group.advance(1200.0, &mut scene), 0);
        assert_eq!(scene.position(mover), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn stop_freezes_member_in_place() {
        let (mut scene, mover, target) = scene();
        let mut group = TweenGroup::new();
        let id = group
            .start(
                Tween::toward(mover, target)
                    .with_duration_ms(100.0)
                    .with_easing(EasingFunction::Linear),
                0.0,
                &scene,
            )
            .unwrap();
        let _ = group.advance(20.0, &mut scene);
        assert!(group.stop(id));
        assert!(!group.stop(id));
        assert!(group.is_empty());
        let _ = group.advance(100.0, &mut scene);
        assert_eq!(scene.position(mover), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn foreign_subject_is_rejected() {
        let (scene, _, target) = scene();
        let mut group = TweenGroup::new();
        let err = group
            .start(Tween::toward(MemberId(42), target), 0.0, &scene)
            .unwrap_err();
        assert!(matches!(err, VantageError::MissingSceneMember(_)));
        assert_eq!(group.len(), 0);
    }
}
