//! Shadow Tag: chase fleeing shadows before your light runs out

pub mod state;
pub mod tick;

pub use state::{GameEvent, Player, Shadow, TagState};
pub use tick::{TickInput, tick};
