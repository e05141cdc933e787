//! Shadow Tag front-end

use super::{AppContext, Game};
use crate::audio::{Loop, SoundBank, SoundEffect};
use crate::input::{Key, KeyState};
use crate::renderer::Vertex;
use crate::renderer::tag_scene::{self, TagView};
use crate::sim::GamePhase;
use crate::sim::tag::{GameEvent, TagState, TickInput, tick};

pub struct ShadowTag {
    pub state: TagState,
}

impl ShadowTag {
    fn play_events(&mut self, ctx: &mut AppContext) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Tagged => ctx.audio.play(SoundEffect::Tag),
                GameEvent::LightLow => ctx.audio.play(SoundEffect::LightLow),
                GameEvent::Footstep => ctx.audio.play(SoundEffect::Footstep),
                GameEvent::LevelComplete => ctx.audio.play(SoundEffect::LevelComplete),
                GameEvent::GameOver => {
                    ctx.audio.stop_loop(Loop::Music);
                    ctx.audio.play(SoundEffect::GameOver);
                }
            }
        }
    }
}

impl Game for ShadowTag {
    const TITLE: &'static str = "Shadow Tag";
    const SOUNDS: SoundBank = SoundBank {
        effects: &[
            (SoundEffect::Tag, "tag.wav"),
            (SoundEffect::LightLow, "light_low.wav"),
            (SoundEffect::LevelComplete, "level_complete.wav"),
            (SoundEffect::GameOver, "game_over.wav"),
            (SoundEffect::Footstep, "move.wav"),
        ],
        loops: &[(Loop::Music, "ambient.mp3")],
    };

    fn new(ctx: &mut AppContext, seed: u64) -> anyhow::Result<Self> {
        log::info!("Shadow Tag starting (seed {seed})");
        ctx.audio.start_loop(Loop::Music);
        Ok(Self {
            state: TagState::new(seed),
        })
    }

    fn update(&mut self, ctx: &mut AppContext, keys: &KeyState) {
        if keys.just_pressed(Key::M) {
            ctx.audio.toggle_music();
        }
        if keys.just_pressed(Key::S) {
            ctx.audio.toggle_sfx();
        }

        let was_finished = self.state.phase.is_finished();
        tick(&mut self.state, &TickInput::sample(keys));
        self.play_events(ctx);

        if was_finished && self.state.phase == GamePhase::Playing {
            log::info!("Level {} started", self.state.level);
            ctx.audio.start_loop(Loop::Music);
        }
    }

    fn draw(&mut self, ctx: &mut AppContext) -> Vec<Vertex> {
        let view = TagView {
            frame: ctx.frame,
            pulse: ctx.settings.effective_pulse(),
            starfield: ctx.settings.quality.starfield_enabled(),
            controls_hint: ctx.settings.show_controls_hint,
        };
        tag_scene::draw(&self.state, &view, &mut ctx.rng).into_vertices()
    }
}
