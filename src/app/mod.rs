//! Game front-ends
//!
//! A front-end owns one game's simulation state and binds it to the outside
//! world: it samples keys into tick input, turns simulation events into
//! sounds and builds the frame's vertices. The platform layer drives it
//! through the [`Game`] trait and never looks inside.

pub mod shadow_tag;
pub mod time_runners;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Settings;
use crate::audio::{AudioManager, SoundBank};
use crate::input::KeyState;
use crate::renderer::Vertex;

pub use shadow_tag::ShadowTag;
pub use time_runners::TimeRunners;

/// Everything a game needs from its surroundings, created once at start-up
pub struct AppContext {
    pub settings: Settings,
    pub audio: AudioManager,
    /// Presentation randomness (stars, textures); never feeds the simulation
    pub rng: Pcg32,
    /// Frames since start-up
    pub frame: u64,
}

impl AppContext {
    pub fn new(settings: Settings, audio: AudioManager, seed: u64) -> Self {
        Self {
            settings,
            audio,
            // Keep the presentation stream apart from the simulation's
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            frame: 0,
        }
    }

    /// Context with no audio output, for tests and headless runs
    pub fn headless(settings: Settings, seed: u64) -> Self {
        let audio = AudioManager::silent(&settings);
        Self::new(settings, audio, seed)
    }
}

/// One playable game
pub trait Game: Sized {
    /// Window title
    const TITLE: &'static str;
    /// Sound files this game loads from the asset directory
    const SOUNDS: SoundBank;

    /// Set up a fresh game; fails only on invalid tuning
    fn new(ctx: &mut AppContext, seed: u64) -> anyhow::Result<Self>;

    /// Advance by one tick with this frame's keys
    fn update(&mut self, ctx: &mut AppContext, keys: &KeyState);

    /// Build this frame in screen pixels
    fn draw(&mut self, ctx: &mut AppContext) -> Vec<Vertex>;

    /// Background colour behind the frame
    fn clear_color(&self) -> [f32; 4] {
        [0.0, 0.0, 0.0, 1.0]
    }
}
