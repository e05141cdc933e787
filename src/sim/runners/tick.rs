//! Fixed timestep Time Runners tick

use super::state::{
    EXPLOSION_YELLOW, GameEvent, INTRO_PAGES, RunnerState, TRAIL_EVERY, milestone_for,
    slow_motion_factor,
};
use crate::input::{Key, KeyState};
use crate::sim::GamePhase;
use crate::sim::particle::Timeline;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Jump key held this tick; also recorded for the past runner
    pub jump: bool,
    /// Any key pressed this frame (turns intro pages)
    pub any_key: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after a collapse
    pub restart: bool,
}

impl TickInput {
    /// Sample the keyboard for one tick
    pub fn sample(keys: &KeyState) -> Self {
        Self {
            jump: keys.held(Key::Up),
            any_key: !keys.presses().is_empty(),
            pause: keys.just_pressed(Key::P),
            restart: keys.just_pressed(Key::Space),
        }
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut RunnerState, input: &TickInput) {
    match state.phase {
        GamePhase::Intro => {
            if input.any_key {
                state.intro_page += 1;
                if state.intro_page >= INTRO_PAGES {
                    state.phase = GamePhase::Playing;
                }
            }
            return;
        }
        GamePhase::GameOver | GamePhase::Won => {
            if input.restart {
                state.reset();
                state.phase = GamePhase::Playing;
            } else {
                // Let the explosion play out behind the overlay
                step_particles(state, 1.0);
            }
            return;
        }
        GamePhase::Playing | GamePhase::Paused => {
            if input.pause {
                state.phase = state.phase.toggled_pause();
            }
        }
    }

    if !state.phase.is_running() {
        return;
    }

    state.ticks += 1;

    // Present runner acts now; the past runner gets the sample from
    // `replay_delay_ticks` ago
    let delayed = state.replay.push_and_pop_oldest(input.jump);
    for (timeline, wants_jump) in [(Timeline::Present, input.jump), (Timeline::Past, delayed)] {
        if wants_jump {
            try_jump(state, timeline);
        }
    }

    update_time_factor(state);
    let factor = state.time_factor;

    let record_trail = state.slow_mo_active && state.ticks % TRAIL_EVERY == 0;
    let tuning = state.tuning.clone();
    state.present.update(&tuning, factor, record_trail);
    state.past.update(&tuning, factor, record_trail);

    state.advance_spawner(factor);

    for obstacle in state.obstacles.iter_mut() {
        obstacle.update(tuning.obstacle_speed, factor);
    }
    state.obstacles.mark_where(|o| o.off_screen());

    step_particles(state, factor);

    // Collisions: any touch in either timeline collapses the run
    let crashed: Vec<Timeline> = [Timeline::Present, Timeline::Past]
        .into_iter()
        .filter(|t| {
            let body = state.runner(*t).rect();
            state
                .obstacles
                .iter()
                .any(|o| o.timeline == *t && body.overlaps(&o.hitbox()))
        })
        .collect();
    for timeline in &crashed {
        let centre = state.runner(*timeline).centre();
        state.burst(centre, EXPLOSION_YELLOW, *timeline, tuning.crash_particles);
        state.events.push(GameEvent::Crash(*timeline));
    }

    state.obstacles.compact();
    state.particles.compact();
    state.particles.truncate_oldest(state.particle_cap);

    if !crashed.is_empty() {
        state.phase = GamePhase::GameOver;
        if state.slow_mo_active {
            state.slow_mo_active = false;
            state.events.push(GameEvent::SlowMoEnded);
        }
        return;
    }

    // Score grows slower while time is slowed
    state.score += factor;
    if let Some(milestone) = milestone_for(state.score, state.milestone) {
        state.milestone = Some(milestone);
        state.milestone_timer = tuning.milestone_ticks;
        state.events.push(GameEvent::Milestone(milestone));
    }
    if state.milestone_timer > 0.0 {
        state.milestone_timer -= factor;
    }
}

/// Jump the runner in `timeline` if it is grounded, with a puff of dust
fn try_jump(state: &mut RunnerState, timeline: Timeline) {
    let (impulse, count) = (state.tuning.jump_impulse, state.tuning.jump_particles);
    let runner = state.runner_mut(timeline);
    if !runner.body.jump(impulse) {
        return;
    }
    let (feet, color) = (runner.feet(), runner.color);
    state.burst(feet, color, timeline, count);
    state.events.push(GameEvent::Jump(timeline));
}

/// Recompute the slow-motion factor from the nearest obstacle ahead
fn update_time_factor(state: &mut RunnerState) {
    let factor = state
        .nearest_gap()
        .and_then(|gap| slow_motion_factor(gap, &state.tuning));
    let was_active = state.slow_mo_active;
    state.slow_mo_active = factor.is_some();
    state.time_factor = factor.unwrap_or(1.0);

    match (was_active, state.slow_mo_active) {
        (false, true) => state.events.push(GameEvent::SlowMoStarted),
        (true, false) => state.events.push(GameEvent::SlowMoEnded),
        _ => {}
    }
    if state.slow_mo_active {
        state.maybe_distort();
    }
}

fn step_particles(state: &mut RunnerState, factor: f32) {
    for particle in state.particles.iter_mut() {
        particle.update(factor);
    }
    state.particles.mark_where(|p| p.is_dead());
    state.particles.compact();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::runners::state::Obstacle;
    use crate::tuning::RunnerTuning;

    fn playing(seed: u64) -> RunnerState {
        let mut state = RunnerState::new(seed, RunnerTuning::default()).unwrap();
        let key = TickInput {
            any_key: true,
            ..Default::default()
        };
        for _ in 0..INTRO_PAGES {
            assert_eq!(state.phase, GamePhase::Intro);
            tick(&mut state, &key);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_intro_pages() {
        let mut state = RunnerState::new(1, RunnerTuning::default()).unwrap();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.intro_page, 0);
        let key = TickInput {
            any_key: true,
            ..Default::default()
        };
        tick(&mut state, &key);
        assert_eq!(state.intro_page, 1);
        assert_eq!(state.phase, GamePhase::Intro);
    }

    #[test]
    fn test_past_runner_jumps_two_seconds_later() {
        let mut state = playing(3);
        let mut present_jump = None;
        let mut past_jump = None;

        for t in 0..400u64 {
            let input = if t == 10 { jump() } else { TickInput::default() };
            // Keep the track clear so nothing interferes
            state.obstacles.clear();
            tick(&mut state, &input);
            for event in state.drain_events() {
                match event {
                    GameEvent::Jump(Timeline::Present) => present_jump = Some(t),
                    GameEvent::Jump(Timeline::Past) => past_jump = Some(t),
                    _ => {}
                }
            }
        }

        assert_eq!(present_jump, Some(10));
        assert_eq!(past_jump, Some(130));
    }

    #[test]
    fn test_runners_never_sink_below_ground() {
        let mut state = playing(4);
        for t in 0..600 {
            let input = if t % 37 < 5 { jump() } else { TickInput::default() };
            state.obstacles.clear();
            tick(&mut state, &input);
            assert!(state.present.body.bottom() <= Timeline::Present.ground_y());
            assert!(state.past.body.bottom() <= Timeline::Past.ground_y());
        }
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = playing(5);
        state
            .obstacles
            .insert(Obstacle::new(Timeline::Past, 105.0, 40.0, 20.0));
        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Crash(Timeline::Past)));
        assert!(events.contains(&GameEvent::SlowMoEnded));
        assert!(state.particles.len() >= 30);
        let score = state.score;

        // Particles keep animating, nothing else does
        let x = state.obstacles.as_slice()[0].x;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.as_slice()[0].x, x);
        assert_eq!(state.score, score);

        // Space restarts
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn test_slow_motion_near_obstacle() {
        let mut state = playing(6);
        // Gap of 30 ahead of the present runner
        state
            .obstacles
            .insert(Obstacle::new(Timeline::Present, 150.0, 40.0, 20.0));
        tick(&mut state, &TickInput::default());

        assert!(state.slow_mo_active);
        assert!((state.time_factor - 0.6).abs() < 1e-5);
        assert!((state.score - 0.6).abs() < 1e-5);
        assert!(state.drain_events().contains(&GameEvent::SlowMoStarted));
    }

    #[test]
    fn test_time_factor_stays_in_bounds() {
        let mut state = playing(7);
        for t in 0..2000 {
            let input = if t % 50 < 3 { jump() } else { TickInput::default() };
            tick(&mut state, &input);
            assert!((0.5..=1.0).contains(&state.time_factor));
            if state.phase == GamePhase::GameOver {
                tick(
                    &mut state,
                    &TickInput {
                        restart: true,
                        ..Default::default()
                    },
                );
            }
        }
    }

    #[test]
    fn test_milestone_event() {
        let mut state = playing(8);
        state.score = 99.5;
        state.obstacles.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.milestone, Some(100));
        assert!(state.drain_events().contains(&GameEvent::Milestone(100)));
        assert!(state.milestone_timer > 170.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99);
        let mut b = playing(99);
        for t in 0..1000 {
            let input = if t % 40 < 4 { jump() } else { TickInput::default() };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.present, b.present);
        assert_eq!(a.past, b.past);
        assert_eq!(a.obstacles.as_slice(), b.obstacles.as_slice());
    }
}
