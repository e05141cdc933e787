//! Paradox Arcade - two small 2D arcade games sharing one engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, AI, collisions, game state)
//! - `renderer`: wgpu rendering pipeline and CPU-side shape tessellation
//! - `platform`: Native window, event loop and frame pacing
//! - `app`: Game front-ends binding simulation, audio and rendering
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window size in logical pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;

    /// Directory optional assets (sounds, settings) are loaded from
    pub const ASSET_DIR: &str = "assets";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector for a heading in radians (y grows downward, like the screen)
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert whole ticks to elapsed whole seconds
#[inline]
pub fn ticks_to_secs(ticks: u64) -> u64 {
    ticks / consts::TICK_RATE as u64
}

/// Convert ticks to milliseconds (for time-based visual effects)
#[inline]
pub fn ticks_to_millis(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}
