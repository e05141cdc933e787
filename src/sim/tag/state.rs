//! Shadow Tag game state and entity rules

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::{PI, TAU};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::collision::{Rect, confine_circle};
use crate::sim::light::Light;
use crate::sim::{Arena, GamePhase, circles_overlap};
use crate::tuning::TagTuning;
use crate::{distance, heading_vector, ticks_to_secs};

/// Playfield bounds
pub const PLAYFIELD: Rect = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);

/// Things that happened during a tick, for audio/feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A shadow was tagged
    Tagged,
    /// Light dropped below the warning threshold
    LightLow,
    /// Every shadow tagged
    LevelComplete,
    /// Light ran out
    GameOver,
    /// Player kept moving long enough for another step sound
    Footstep,
}

/// The player's light orb
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub light: Light,
    /// Moving ticks since the last footstep
    moving_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &TagTuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            light: Light::new(tuning.light_initial, tuning.light_floor),
            moving_ticks: 0,
        }
    }

    /// Move along `dir` (components in -1..=1), staying on screen.
    /// Returns whether the orb actually moved.
    pub fn steer(&mut self, dir: Vec2) -> bool {
        let before = self.pos;
        self.pos += dir * self.speed;
        confine_circle(&mut self.pos, self.radius, &PLAYFIELD);
        self.pos != before
    }

    /// Count a moving tick; true when a footstep is due
    pub fn footstep(&mut self, moved: bool, interval: u32) -> bool {
        if !moved {
            return false;
        }
        self.moving_ticks += 1;
        if self.moving_ticks >= interval {
            self.moving_ticks = 0;
            return true;
        }
        false
    }
}

/// A wandering shadow
#[derive(Debug, Clone)]
pub struct Shadow {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Current heading (radians)
    pub heading: f32,
    /// Ticks until the next wander heading change
    pub turn_in: u32,
    pub tagged: bool,
    /// Opacity while fading out after a tag (255 = opaque)
    pub fade: u8,
}

impl Shadow {
    pub fn new(pos: Vec2, tuning: &TagTuning, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            radius: tuning.shadow_radius,
            speed: tuning.shadow_speed,
            heading: rng.random_range(0.0..TAU),
            turn_in: rng.random_range(tuning.wander_ticks.0..=tuning.wander_ticks.1),
            tagged: false,
            fade: 255,
        }
    }

    /// One tick of flee/wander AI, then bounce off the screen edges
    pub fn update(&mut self, player: &Player, tuning: &TagTuning, rng: &mut impl Rng) {
        if self.tagged {
            self.fade = self.fade.saturating_sub(tuning.fade_step);
            return;
        }

        if self.turn_in == 0 {
            self.heading = rng.random_range(0.0..TAU);
            self.turn_in = rng.random_range(tuning.wander_ticks.0..=tuning.wander_ticks.1);
        } else {
            self.turn_in -= 1;
        }

        let light_radius = player.light.radius();
        let dist = distance(self.pos, player.pos);
        let speed = if dist < light_radius {
            // Run directly away from the orb, slower the deeper in the light
            let away = self.pos - player.pos;
            self.heading = away.y.atan2(away.x);
            self.speed * (dist / light_radius).max(tuning.flee_min_speed_factor)
        } else {
            self.speed
        };

        self.pos += heading_vector(self.heading) * speed;

        let hit = confine_circle(&mut self.pos, self.radius, &PLAYFIELD);
        if hit.vertical {
            self.heading = PI - self.heading;
        }
        if hit.horizontal {
            self.heading = -self.heading;
        }
    }

    /// Tagged and fully faded: ready to be removed
    pub fn is_gone(&self) -> bool {
        self.tagged && self.fade == 0
    }
}

/// Complete Shadow Tag state
#[derive(Debug, Clone)]
pub struct TagState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    /// Balance for the current level
    pub tuning: TagTuning,
    pub phase: GamePhase,
    pub player: Player,
    pub shadows: Arena<Shadow>,
    /// Shadows the level started with
    pub shadow_total: usize,
    pub score: u64,
    /// Ticks spent playing this level
    pub time_ticks: u64,
    /// Low-light warning already raised for the current dip
    pub light_warned: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl TagState {
    /// New game at level 1, showing the intro
    pub fn new(seed: u64) -> Self {
        let tuning = TagTuning::for_level(1);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            player: Player::new(PLAYFIELD.center(), &tuning),
            tuning,
            phase: GamePhase::Intro,
            shadows: Arena::new(),
            shadow_total: 0,
            score: 0,
            time_ticks: 0,
            light_warned: false,
            events: Vec::new(),
        };
        state.reset_level();
        state
    }

    /// Restart the current level from scratch
    pub fn reset_level(&mut self) {
        self.player = Player::new(PLAYFIELD.center(), &self.tuning);
        self.shadows.clear();
        for _ in 0..self.tuning.shadow_count {
            let pos = self.spawn_point();
            let shadow = Shadow::new(pos, &self.tuning, &mut self.rng);
            self.shadows.insert(shadow);
        }
        self.shadow_total = self.tuning.shadow_count;
        self.score = 0;
        self.time_ticks = 0;
        self.light_warned = false;
        self.events.clear();
    }

    /// Move on to the next level (more shadows, faster decay)
    pub fn next_level(&mut self) {
        self.level += 1;
        self.tuning = TagTuning::for_level(self.level);
        self.reset_level();
    }

    /// Random spot on screen outside the player's light
    fn spawn_point(&mut self) -> Vec2 {
        let r = self.tuning.shadow_radius;
        let keep_out = self.player.light.radius();
        loop {
            let p = Vec2::new(
                self.rng.random_range(r..=SCREEN_WIDTH - r),
                self.rng.random_range(r..=SCREEN_HEIGHT - r),
            );
            if distance(p, self.player.pos) > keep_out {
                return p;
            }
        }
    }

    /// Shadows still to be tagged
    pub fn active_shadows(&self) -> usize {
        self.shadows.iter().filter(|s| !s.tagged).count()
    }

    /// Whole seconds spent on this level
    pub fn elapsed_secs(&self) -> u64 {
        ticks_to_secs(self.time_ticks)
    }

    /// Run every shadow's AI for one tick and tag the ones touching the
    /// orb. Returns how many were newly tagged.
    pub fn step_shadows(&mut self) -> usize {
        let mut tagged = 0;
        for shadow in self.shadows.iter_mut() {
            shadow.update(&self.player, &self.tuning, &mut self.rng);
            if !shadow.tagged
                && circles_overlap(self.player.pos, self.player.radius, shadow.pos, shadow.radius)
            {
                shadow.tagged = true;
                tagged += 1;
            }
        }
        tagged
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
