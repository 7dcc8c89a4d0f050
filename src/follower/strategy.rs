use bevy::math::Vec2;
use rand::Rng;

use super::config::{EyesConfig, FollowStrategy, FollowerConfig};
use super::pointer::PointerSignal;

/// Offset magnitude used when the follower sits exactly on its target
const ZERO_OFFSET_SUBSTITUTE: f32 = 2.0;

/// Motion state for one follower
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FollowerState {
    /// Current position (page coordinates)
    pub position: Vec2,
    /// Point the follower is being pulled toward
    pub target: Vec2,
    /// Per-tick velocity, only used by `wobble`
    pub velocity: Vec2,
}

/// Advance the body one tick with the given strategy
///
/// `Eyes` leaves the body where it is.
pub fn step(
    strategy: FollowStrategy,
    state: &mut FollowerState,
    config: &FollowerConfig,
    pointer: &PointerSignal,
    rng: &mut impl Rng,
) {
    match strategy {
        FollowStrategy::Basic => basic(state, config, pointer),
        FollowStrategy::Wobble => wobble(state, config, pointer, rng),
        FollowStrategy::Eyes => {}
    }
}

/// Target drifts toward the pointer by `1/inertia` of the gap, position eases
/// toward the target by `1/spring` of its gap
pub fn basic(state: &mut FollowerState, config: &FollowerConfig, pointer: &PointerSignal) {
    let delta = pointer.position() - state.position;

    state.target += delta / config.inertia;
    state.position += (state.target - state.position) / config.spring;
}

/// Velocity lags toward a `spring`-length pull at the target, then the target
/// is re-rolled within `wobble` of the pointer
pub fn wobble(
    state: &mut FollowerState,
    config: &FollowerConfig,
    pointer: &PointerSignal,
    rng: &mut impl Rng,
) {
    let offset = state.target - state.position;
    let mut distance = offset.length();
    if distance == 0.0 {
        distance = ZERO_OFFSET_SUBSTITUTE;
    }

    let desired = config.spring * (offset / distance);
    state.velocity += (desired - state.velocity) / config.inertia;
    state.position += state.velocity;

    let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
    state.target = pointer.position() + jitter * config.wobble;
}

/// Eyes translation inside the body box
///
/// Centered in the body, pushed exactly `radius` toward the pointer once the
/// pointer is farther than `radius` from the body position.
pub fn eyes(
    state: &FollowerState,
    config: &FollowerConfig,
    eyes: &EyesConfig,
    pointer: &PointerSignal,
) -> Vec2 {
    let delta = pointer.position() - state.position;
    let distance_sq = delta.length_squared();

    let mut offset = Vec2::new(
        (config.width - eyes.width) / 2.0,
        (config.height - eyes.height) / 2.0,
    );

    if distance_sq > eyes.radius * eyes.radius {
        let angle = delta.y.atan2(delta.x);
        offset += eyes.radius * Vec2::new(angle.cos(), angle.sin());
    }

    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f32 = 1e-6;

    fn config(spring: f32, inertia: f32) -> FollowerConfig {
        FollowerConfig {
            spring,
            inertia,
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_first_tick() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(100.0, 100.0);
        let mut state = FollowerState::default();

        basic(&mut state, &config, &pointer);

        let expected_target = 100.0 / 30.0;
        let expected_position = expected_target / 8.0;
        assert!((state.target.x - expected_target).abs() < EPSILON);
        assert!((state.target.y - expected_target).abs() < EPSILON);
        assert!((state.position.x - expected_position).abs() < EPSILON);
        assert!((state.position.y - expected_position).abs() < EPSILON);
        assert!((state.position.x - 0.416_666_67).abs() < EPSILON);
    }

    #[test]
    fn test_basic_converges_monotonically() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(100.0, 100.0);
        let mut state = FollowerState::default();

        let mut last_distance = pointer.position().distance(state.position);
        for tick in 0..300 {
            basic(&mut state, &config, &pointer);
            let distance = pointer.position().distance(state.position);
            assert!(
                distance <= last_distance + 1e-4,
                "distance grew at tick {}: {} -> {}",
                tick,
                last_distance,
                distance
            );
            last_distance = distance;
        }

        for _ in 0..300 {
            basic(&mut state, &config, &pointer);
        }
        assert!(pointer.position().distance(state.position) < 1e-2);
    }

    #[test]
    fn test_basic_at_rest_on_pointer_stays_put() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(40.0, -12.0);
        let mut state = FollowerState {
            position: pointer.position(),
            target: pointer.position(),
            velocity: Vec2::ZERO,
        };

        basic(&mut state, &config, &pointer);

        assert_eq!(state.position, pointer.position());
        assert_eq!(state.target, pointer.position());
    }

    #[test]
    fn test_wobble_first_step_bounded_by_spring_over_inertia() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(500.0, 500.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = FollowerState {
            target: Vec2::new(300.0, -40.0),
            ..Default::default()
        };

        let before = state.position;
        wobble(&mut state, &config, &pointer, &mut rng);

        let step = state.position.distance(before);
        assert!(step <= config.spring / config.inertia + EPSILON);
    }

    #[test]
    fn test_wobble_velocity_changes_continuously() {
        let config = config(8.0, 30.0);
        let mut pointer = PointerSignal::new(200.0, 100.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = FollowerState::default();

        for tick in 0..500 {
            // Yank the pointer around to force abrupt target changes
            if tick % 50 == 0 {
                pointer.set(Vec2::new(-pointer.x(), pointer.y() + 75.0));
            }

            let before = state.velocity;
            wobble(&mut state, &config, &pointer, &mut rng);

            let change = state.velocity.distance(before);
            assert!(change <= 2.0 * config.spring / config.inertia + EPSILON);
            assert!(state.velocity.length() <= config.spring + EPSILON);
        }
    }

    #[test]
    fn test_wobble_target_stays_within_jitter() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(10.0, 20.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = FollowerState::default();

        for _ in 0..200 {
            wobble(&mut state, &config, &pointer, &mut rng);
            let jitter = state.target - pointer.position();
            assert!(jitter.x.abs() <= config.wobble / 2.0);
            assert!(jitter.y.abs() <= config.wobble / 2.0);
        }
    }

    #[test]
    fn test_wobble_zero_offset_does_not_produce_nan() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = FollowerState::default();

        wobble(&mut state, &config, &pointer, &mut rng);

        assert!(state.position.is_finite());
        assert_eq!(state.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_eyes_pushed_by_radius() {
        let config = FollowerConfig::default();
        let eyes_config = EyesConfig {
            radius: 5.0,
            ..Default::default()
        };
        let pointer = PointerSignal::new(10.0, 0.0);
        let state = FollowerState::default();

        let offset = eyes(&state, &config, &eyes_config, &pointer);

        let center = Vec2::new(
            (config.width - eyes_config.width) / 2.0,
            (config.height - eyes_config.height) / 2.0,
        );
        assert!((offset - (center + Vec2::new(5.0, 0.0))).length() < EPSILON);
    }

    #[test]
    fn test_eyes_centered_when_pointer_within_radius() {
        let config = FollowerConfig::default();
        let eyes_config = EyesConfig::default();
        let pointer = PointerSignal::new(3.0, 4.0); // exactly radius 5 away
        let state = FollowerState::default();

        let offset = eyes(&state, &config, &eyes_config, &pointer);

        assert_eq!(offset, Vec2::new(19.0, 17.0));
    }

    #[test]
    fn test_eyes_never_exceed_radius() {
        let config = FollowerConfig::default();
        let eyes_config = EyesConfig::default();
        let state = FollowerState {
            position: Vec2::new(25.0, -60.0),
            ..Default::default()
        };
        let center = Vec2::new(19.0, 17.0);

        for i in 0..64 {
            let angle = i as f32 * std::f32::consts::TAU / 64.0;
            for distance in [0.5, 4.9, 5.1, 80.0, 1.0e6] {
                let pointer = PointerSignal::new(
                    state.position.x + distance * angle.cos(),
                    state.position.y + distance * angle.sin(),
                );
                let offset = eyes(&state, &config, &eyes_config, &pointer);
                assert!((offset - center).length() <= eyes_config.radius + 1e-4);
            }
        }
    }

    #[test]
    fn test_eyes_strategy_leaves_body_still() {
        let config = config(8.0, 30.0);
        let pointer = PointerSignal::new(100.0, 100.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = FollowerState::default();

        step(FollowStrategy::Eyes, &mut state, &config, &pointer, &mut rng);

        assert_eq!(state, FollowerState::default());
    }
}
