//! Data-driven game balance
//!
//! All gameplay numbers live here so the simulation code reads as rules,
//! not magic constants. Speeds are pixels per nominal tick.

use crate::consts::TICK_RATE;

/// Shadow Tag balance
#[derive(Debug, Clone, PartialEq)]
pub struct TagTuning {
    pub player_speed: f32,
    pub player_radius: f32,
    pub shadow_speed: f32,
    pub shadow_radius: f32,
    pub shadow_count: usize,
    /// Light radius at the start of a level
    pub light_initial: f32,
    /// Light floor; reaching it ends the run
    pub light_floor: f32,
    /// Light radius lost per tick
    pub light_shrink_rate: f32,
    /// Slowest fraction of base speed a fleeing shadow moves at
    pub flee_min_speed_factor: f32,
    /// Inclusive range of ticks between wander heading changes
    pub wander_ticks: (u32, u32),
    /// Fade-out step per tick once a shadow is tagged (255 = opaque)
    pub fade_step: u8,
    pub tag_score: u64,
    /// Consecutive moving ticks between footstep sounds
    pub footstep_interval: u32,
    /// Light percentage below which the warning fires
    pub light_warning_percent: f32,
}

impl Default for TagTuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_radius: 10.0,
            shadow_speed: 2.0,
            shadow_radius: 15.0,
            shadow_count: 5,
            light_initial: 150.0,
            light_floor: 30.0,
            light_shrink_rate: 0.05,
            flee_min_speed_factor: 0.2,
            wander_ticks: (30, 90),
            fade_step: 15,
            tag_score: 100,
            footstep_interval: 20,
            light_warning_percent: 25.0,
        }
    }
}

impl TagTuning {
    /// Extra shadows per level
    pub const SHADOWS_PER_LEVEL: usize = 2;
    /// Extra light shrink per level
    pub const SHRINK_PER_LEVEL: f32 = 0.01;

    /// Balance for a given level (1-based); later levels add shadows and
    /// drain the light faster
    pub fn for_level(level: u32) -> Self {
        let extra = level.saturating_sub(1);
        let base = Self::default();
        Self {
            shadow_count: base.shadow_count + Self::SHADOWS_PER_LEVEL * extra as usize,
            light_shrink_rate: base.light_shrink_rate + Self::SHRINK_PER_LEVEL * extra as f32,
            ..base
        }
    }
}

/// Time Runners balance
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerTuning {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub obstacle_speed: f32,
    /// Ticks between the present runner's input and the past runner's replay
    pub replay_delay_ticks: usize,
    /// Gap to the nearest obstacle below which time slows
    pub slow_mo_distance: f32,
    /// Slowest time factor, reached at zero gap
    pub slow_mo_factor: f32,
    /// Ticks before the first obstacle pair
    pub first_spawn_delay: f32,
    /// Inclusive range of ticks between later obstacle pairs
    pub spawn_delay: (u32, u32),
    /// Inclusive obstacle width range
    pub obstacle_width: (u32, u32),
    pub obstacle_height: f32,
    pub jump_particles: usize,
    pub crash_particles: usize,
    /// Chance per slow-motion tick of spawning ambient distortion particles
    pub distortion_chance: f64,
    pub distortion_particles: usize,
    /// Ticks a milestone banner stays up
    pub milestone_ticks: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_impulse: -15.0,
            obstacle_speed: 5.0,
            replay_delay_ticks: 2 * TICK_RATE as usize,
            slow_mo_distance: 150.0,
            slow_mo_factor: 0.5,
            first_spawn_delay: 60.0,
            spawn_delay: (45, 90),
            obstacle_width: (30, 80),
            obstacle_height: 20.0,
            jump_particles: 10,
            crash_particles: 30,
            distortion_chance: 0.2,
            distortion_particles: 3,
            milestone_ticks: 3.0 * TICK_RATE as f32,
        }
    }
}
