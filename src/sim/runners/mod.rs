//! Time Runners: one runner in the present, one replaying it two seconds later

pub mod state;
pub mod tick;

pub use state::{
    GameEvent, Obstacle, Runner, RunnerState, milestone_for, milestone_message,
    slow_motion_factor, time_distortion,
};
pub use tick::{TickInput, tick};
