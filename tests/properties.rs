//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use paradox_arcade::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use paradox_arcade::sim::light::Light;
use paradox_arcade::sim::runners::{self, RunnerState, slow_motion_factor};
use paradox_arcade::sim::tag::{self, TagState};
use paradox_arcade::sim::{Body, GamePhase, Rect, ReplayBuffer};
use paradox_arcade::tuning::RunnerTuning;

proptest! {
    #[test]
    fn replay_returns_value_pushed_capacity_calls_ago(
        capacity in 1usize..40,
        pushes in prop::collection::vec(any::<bool>(), 0..200),
    ) {
        let mut buffer = ReplayBuffer::new(capacity, false).unwrap();
        for (k, value) in pushes.iter().enumerate() {
            let out = buffer.push_and_pop_oldest(*value);
            let expected = if k >= capacity { pushes[k - capacity] } else { false };
            prop_assert_eq!(out, expected);
            prop_assert_eq!(buffer.len(), capacity);
        }
    }

    #[test]
    fn light_stays_between_floor_and_initial(
        initial in 31.0f32..400.0,
        floor in 0.0f32..30.0,
        decays in prop::collection::vec(-1.0f32..5.0, 0..500),
    ) {
        let mut light = Light::new(initial, floor);
        for amount in decays {
            light.decay(amount);
            prop_assert!(light.radius() >= floor);
            prop_assert!(light.radius() <= initial);
            prop_assert!((0.0..=100.0).contains(&light.percent()));
        }
    }

    #[test]
    fn body_never_sinks_below_ground(
        jumps in prop::collection::vec(any::<bool>(), 1..300),
        factor in 0.5f32..=1.0,
    ) {
        let ground = 240.0;
        let mut body = Body::new(200.0, 40.0);
        for jump in jumps {
            if jump {
                body.jump(-15.0);
            }
            body.step(1.0, ground, factor);
            prop_assert!(body.bottom() <= ground + 1e-3);
        }
    }

    #[test]
    fn slow_motion_factor_is_bounded(gap in -200.0f32..1000.0) {
        let tuning = RunnerTuning::default();
        let factor = slow_motion_factor(gap, &tuning).unwrap_or(1.0);
        prop_assert!((0.5..=1.0).contains(&factor));
    }

    #[test]
    fn shadows_stay_on_screen(
        seed in any::<u64>(),
        moves in prop::collection::vec((-1i8..=1, -1i8..=1), 1..300),
    ) {
        let mut state = TagState::new(seed);
        state.phase = GamePhase::Playing;
        let screen = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
        for (dx, dy) in moves {
            let input = tag::TickInput {
                dir: Vec2::new(dx as f32, dy as f32),
                ..Default::default()
            };
            tag::tick(&mut state, &input);
            for shadow in &state.shadows {
                prop_assert!(shadow.pos.x >= shadow.radius && shadow.pos.x <= screen.right() - shadow.radius);
                prop_assert!(shadow.pos.y >= shadow.radius && shadow.pos.y <= screen.bottom() - shadow.radius);
            }
            prop_assert!(screen.contains(state.player.pos));
        }
    }

    #[test]
    fn runners_stay_above_their_ground(
        seed in any::<u64>(),
        jumps in prop::collection::vec(any::<bool>(), 1..400),
    ) {
        let mut state = RunnerState::new(seed, RunnerTuning::default()).unwrap();
        state.phase = GamePhase::Playing;
        for jump in jumps {
            runners::tick(&mut state, &runners::TickInput { jump, ..Default::default() });
            for runner in [&state.present, &state.past] {
                prop_assert!(runner.body.bottom() <= runner.timeline.ground_y() + 1e-3);
            }
            prop_assert!((0.5..=1.0).contains(&state.time_factor));
        }
    }
}
