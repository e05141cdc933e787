//! Fixed timestep Shadow Tag tick

use glam::Vec2;

use super::state::{GameEvent, TagState};
use crate::input::{Key, KeyState};
use crate::sim::GamePhase;
use crate::sim::light::light_warning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement direction, each component in -1..=1
    pub dir: Vec2,
    /// Any key pressed this frame (leaves the intro)
    pub any_key: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart / next level
    pub restart: bool,
}

impl TickInput {
    /// Sample the keyboard for one tick
    pub fn sample(keys: &KeyState) -> Self {
        let axis = |neg: Key, pos: Key| keys.held(pos) as i32 as f32 - keys.held(neg) as i32 as f32;
        Self {
            dir: Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down)),
            any_key: !keys.presses().is_empty(),
            pause: keys.just_pressed(Key::P),
            restart: keys.just_pressed(Key::Space),
        }
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut TagState, input: &TickInput) {
    match state.phase {
        GamePhase::Intro => {
            if input.any_key {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Won => {
            if input.restart {
                state.next_level();
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset_level();
                state.phase = GamePhase::Playing;
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

    state.time_ticks += 1;

    // Player movement and light decay
    let moved = state.player.steer(input.dir);
    if state.player.footstep(moved, state.tuning.footstep_interval) {
        state.events.push(GameEvent::Footstep);
    }
    state.player.light.decay(state.tuning.light_shrink_rate);

    // Shadows: AI first, then tag test against the orb
    let tagged = state.step_shadows();
    for _ in 0..tagged {
        state.score += state.tuning.tag_score;
        state.events.push(GameEvent::Tagged);
    }
    state.shadows.mark_where(|s| s.is_gone());
    state.shadows.compact();

    // Low-light warning, once per dip below the threshold
    let low = light_warning(
        state.player.light.percent(),
        state.tuning.light_warning_percent,
    );
    if low && !state.light_warned {
        state.events.push(GameEvent::LightLow);
    }
    state.light_warned = low;

    // Win beats loss when both happen on the same tick
    if state.active_shadows() == 0 {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::LevelComplete);
    } else if state.player.light.exhausted() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tag::state::PLAYFIELD;

    fn playing(seed: u64) -> TagState {
        let mut state = TagState::new(seed);
        tick(
            &mut state,
            &TickInput {
                any_key: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_intro_waits_for_key() {
        let mut state = TagState::new(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_sample_keys() {
        let mut keys = KeyState::new();
        keys.key_down(Key::Left, false);
        keys.key_down(Key::Down, false);
        keys.key_down(Key::P, false);
        let input = TickInput::sample(&keys);
        assert_eq!(input.dir, Vec2::new(-1.0, 1.0));
        assert!(input.pause && input.any_key && !input.restart);

        keys.end_frame();
        keys.key_down(Key::Right, false);
        let input = TickInput::sample(&keys);
        assert_eq!(input.dir, Vec2::new(0.0, 1.0));
        assert!(!input.pause);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = playing(3);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let radius = state.player.light.radius();
        let ticks = state.time_ticks;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.light.radius(), radius);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tagging_scores_and_wins() {
        let mut state = playing(5);
        // Park every shadow on the orb
        let centre = state.player.pos;
        for shadow in state.shadows.iter_mut() {
            shadow.pos = centre;
            shadow.turn_in = 100;
        }
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 500);
        assert_eq!(state.active_shadows(), 0);
        assert_eq!(state.phase, GamePhase::Won);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Tagged).count(), 5);
        assert!(events.contains(&GameEvent::LevelComplete));

        // Space advances to level 2
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.active_shadows(), 7);
    }

    #[test]
    fn test_tagged_shadows_removed_after_fade() {
        let mut state = playing(5);
        let centre = state.player.pos;
        if let Some(shadow) = state.shadows.get_mut(0) {
            shadow.pos = centre;
            shadow.turn_in = 100;
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.shadows.len(), 5);
        assert_eq!(state.active_shadows(), 4);

        // Move the orb away so no more tags happen, then let it fade
        state.player.pos = glam::Vec2::new(10.0, 10.0);
        for shadow in state.shadows.iter_mut().filter(|s| !s.tagged) {
            shadow.pos = glam::Vec2::new(700.0, 500.0);
        }
        for _ in 0..17 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.shadows.len(), 4);
    }

    #[test]
    fn test_light_runs_out() {
        let mut state = playing(8);
        // Keep shadows far from the orb in the corner
        state.player.pos = glam::Vec2::new(10.0, 10.0);
        let mut events = Vec::new();
        for _ in 0..5000 {
            for shadow in state.shadows.iter_mut() {
                shadow.pos = glam::Vec2::new(700.0, 500.0);
            }
            tick(&mut state, &TickInput::default());
            events.extend(state.drain_events());
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.light.radius(), state.player.light.floor());
        assert_eq!(events.iter().filter(|e| **e == GameEvent::LightLow).count(), 1);
        assert_eq!(events.last(), Some(&GameEvent::GameOver));

        // Space replays the same level
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.light.radius(), 150.0);
    }

    #[test]
    fn test_shadows_stay_on_screen() {
        let mut state = playing(11);
        let dirs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, -1.0),
        ];
        for t in 0..600 {
            let input = TickInput {
                dir: dirs[t / 200],
                ..Default::default()
            };
            tick(&mut state, &input);
            for shadow in &state.shadows {
                assert!(shadow.pos.x >= PLAYFIELD.left() + shadow.radius - 1e-3);
                assert!(shadow.pos.x <= PLAYFIELD.right() - shadow.radius + 1e-3);
                assert!(shadow.pos.y >= PLAYFIELD.top() + shadow.radius - 1e-3);
                assert!(shadow.pos.y <= PLAYFIELD.bottom() - shadow.radius + 1e-3);
            }
            if state.phase != GamePhase::Playing {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(1234);
        let mut b = playing(1234);
        let input = TickInput {
            dir: Vec2::new(1.0, -1.0),
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        let pa: Vec<_> = a.shadows.iter().map(|s| s.pos).collect();
        let pb: Vec<_> = b.shadows.iter().map(|s| s.pos).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.score, b.score);
    }
}
