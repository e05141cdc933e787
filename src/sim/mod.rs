//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (optionally scaled by a time factor)
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod light;
pub mod particle;
pub mod phase;
pub mod replay;
pub mod runners;
pub mod tag;

pub use arena::Arena;
pub use body::{Body, GroundContact};
pub use collision::{Rect, circles_overlap};
pub use particle::Particle;
pub use phase::GamePhase;
pub use replay::ReplayBuffer;

/// 8-bit RGB colour, as used by the game palettes
pub type Rgb = [u8; 3];
