//! Time Runners front-end

use anyhow::Context;

use super::{AppContext, Game};
use crate::audio::{Loop, SoundBank, SoundEffect};
use crate::input::KeyState;
use crate::renderer::Vertex;
use crate::renderer::runners_scene::{self, RunnerView};
use crate::sim::GamePhase;
use crate::sim::runners::{GameEvent, RunnerState, TickInput, milestone_message, tick};
use crate::tuning::RunnerTuning;

pub struct TimeRunners {
    pub state: RunnerState,
}

impl TimeRunners {
    /// Build the run state for `tuning`
    pub fn with_tuning(ctx: &mut AppContext, seed: u64, tuning: RunnerTuning) -> anyhow::Result<Self> {
        let mut state = RunnerState::new(seed, tuning).context("replay delay must be at least one tick")?;
        state.particle_cap = ctx.settings.max_particles();
        ctx.audio.start_loop(Loop::Music);
        log::info!(
            "Time Runners starting (seed {seed}, particle cap {})",
            state.particle_cap
        );
        Ok(Self { state })
    }

    fn play_events(&mut self, ctx: &mut AppContext) {
        let mut crashed = false;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jump(_) => ctx.audio.play(SoundEffect::Jump),
                GameEvent::SlowMoStarted => ctx.audio.start_loop(Loop::SlowMo),
                GameEvent::SlowMoEnded => ctx.audio.stop_loop(Loop::SlowMo),
                GameEvent::Milestone(m) => {
                    log::info!("Milestone {m}: {}", milestone_message(m).unwrap_or_default());
                }
                GameEvent::Crash(timeline) => {
                    log::debug!("Crash in the {timeline:?} timeline");
                    crashed = true;
                }
            }
        }

        // Both runners may crash on the same tick; one collapse sound
        if crashed {
            log::info!("Temporal collapse at score {}", self.state.score as u64);
            ctx.audio.stop_loop(Loop::SlowMo);
            ctx.audio.stop_loop(Loop::Music);
            ctx.audio.play(SoundEffect::GameOver);
        }
    }
}

impl Game for TimeRunners {
    const TITLE: &'static str = "Time Runners: Paradox Shift";
    const SOUNDS: SoundBank = SoundBank {
        effects: &[
            (SoundEffect::Jump, "jump.wav"),
            (SoundEffect::GameOver, "game_over.wav"),
        ],
        loops: &[
            (Loop::Music, "background_music.mp3"),
            (Loop::SlowMo, "slow_mo.wav"),
        ],
    };

    fn new(ctx: &mut AppContext, seed: u64) -> anyhow::Result<Self> {
        Self::with_tuning(ctx, seed, RunnerTuning::default())
    }

    fn update(&mut self, ctx: &mut AppContext, keys: &KeyState) {
        let was_finished = self.state.phase.is_finished();
        tick(&mut self.state, &TickInput::sample(keys));
        self.play_events(ctx);

        if was_finished && self.state.phase == GamePhase::Playing {
            log::info!("Experiment restarted");
            ctx.audio.start_loop(Loop::Music);
        }
    }

    fn draw(&mut self, ctx: &mut AppContext) -> Vec<Vertex> {
        let view = RunnerView {
            frame: ctx.frame,
            pulse: ctx.settings.effective_pulse(),
            starfield: ctx.settings.quality.starfield_enabled(),
        };
        runners_scene::draw(&self.state, &view, &mut ctx.rng).into_vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::input::Key;
    use crate::settings::QualityPreset;

    fn press(key: Key) -> KeyState {
        let mut keys = KeyState::new();
        keys.key_down(key, false);
        keys
    }

    #[test]
    fn test_particle_cap_follows_settings() {
        let mut ctx = AppContext::headless(Settings::from_preset(QualityPreset::Low), 1);
        let game = TimeRunners::new(&mut ctx, 1).unwrap();
        assert_eq!(game.state.particle_cap, 100);

        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        let mut ctx = AppContext::headless(settings, 1);
        let game = TimeRunners::new(&mut ctx, 1).unwrap();
        assert_eq!(game.state.particle_cap, 0);
    }

    #[test]
    fn test_zero_delay_is_an_error() {
        let mut ctx = AppContext::headless(Settings::default(), 1);
        let tuning = RunnerTuning {
            replay_delay_ticks: 0,
            ..Default::default()
        };
        assert!(TimeRunners::with_tuning(&mut ctx, 1, tuning).is_err());
    }

    #[test]
    fn test_story_then_crash_then_restart() {
        let mut ctx = AppContext::headless(Settings::default(), 4);
        let mut game = TimeRunners::new(&mut ctx, 4).unwrap();
        for _ in 0..3 {
            game.update(&mut ctx, &press(Key::Other));
        }
        assert_eq!(game.state.phase, GamePhase::Playing);

        // Never jumping runs into the first obstacle pair
        let idle = KeyState::new();
        for _ in 0..600 {
            game.update(&mut ctx, &idle);
            if game.state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert!(game.state.events.is_empty());
        assert!(!game.draw(&mut ctx).is_empty());

        game.update(&mut ctx, &press(Key::Space));
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert_eq!(game.state.score, 0.0);
    }
}
