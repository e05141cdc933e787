//! Time Runners game state: two timelines, one shared obstacle pattern

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::collision::Rect;
use crate::sim::particle::{Particle, Timeline};
use crate::sim::{Arena, Body, GamePhase, ReplayBuffer, Rgb};
use crate::tuning::RunnerTuning;

/// Y of the line between the two timelines
pub const TIMELINE_SPLIT: f32 = SCREEN_HEIGHT / 2.0;
/// Height of the ground strip at the bottom of each timeline
pub const GROUND_DEPTH: f32 = 60.0;
/// Runners never move horizontally
pub const RUNNER_X: f32 = 100.0;
pub const RUNNER_WIDTH: f32 = 20.0;
pub const RUNNER_HEIGHT: f32 = 40.0;
/// Trail samples kept while time is slowed
pub const TRAIL_LEN: usize = 10;
/// Record a trail sample every this many ticks
pub const TRAIL_EVERY: u64 = 5;
/// Animation phase wraps at this value
pub const ANIM_FRAMES: f32 = 4.0;
/// Obstacle spikes add this much height above the box
pub const SPIKE_HEIGHT: f32 = 10.0;
/// Number of intro story pages
pub const INTRO_PAGES: usize = 3;

pub const PRESENT_BLUE: Rgb = [0, 0, 255];
pub const PAST_RED: Rgb = [255, 0, 0];
pub const OBSTACLE_RED: Rgb = [255, 0, 0];
pub const EXPLOSION_YELLOW: Rgb = [255, 255, 0];
pub const DISTORTION_BLUE: Rgb = [100, 100, 255];
pub const DISTORTION_RED: Rgb = [255, 100, 100];

/// Score thresholds and the banner each one shows
pub const MILESTONES: [(u32, &str); 6] = [
    (100, "TEMPORAL STABILITY AT 10%"),
    (500, "TIMELINE CONVERGENCE BEGINNING"),
    (1000, "QUANTUM FLUCTUATIONS DETECTED"),
    (2000, "TIMELINE STABILIZING"),
    (3000, "PARADOX RESOLUTION IMMINENT"),
    (5000, "HUMANITY'S FUTURE SECURED!"),
];

/// Things that happened during a tick, for audio/feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump(Timeline),
    SlowMoStarted,
    SlowMoEnded,
    Milestone(u32),
    Crash(Timeline),
}

impl Timeline {
    /// Ground line (top of the ground strip) for this timeline
    pub fn ground_y(self) -> f32 {
        match self {
            Timeline::Present => TIMELINE_SPLIT - GROUND_DEPTH,
            Timeline::Past => SCREEN_HEIGHT - GROUND_DEPTH,
        }
    }

    /// Vertical extent of this timeline's half of the screen
    pub fn band(self) -> (f32, f32) {
        match self {
            Timeline::Present => (0.0, TIMELINE_SPLIT),
            Timeline::Past => (TIMELINE_SPLIT, SCREEN_HEIGHT),
        }
    }
}

/// One of the two stick-figure runners
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    pub timeline: Timeline,
    pub x: f32,
    pub width: f32,
    pub body: Body,
    pub color: Rgb,
    /// Run cycle phase in `[0, ANIM_FRAMES)`
    pub anim: f32,
    /// Recent top-left positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Runner {
    pub fn new(timeline: Timeline) -> Self {
        let color = match timeline {
            Timeline::Present => PRESENT_BLUE,
            Timeline::Past => PAST_RED,
        };
        Self {
            timeline,
            x: RUNNER_X,
            width: RUNNER_WIDTH,
            body: Body::new(timeline.ground_y() - RUNNER_HEIGHT, RUNNER_HEIGHT),
            color,
            anim: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LEN + 1),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.body.y, self.width, self.body.height)
    }

    /// Bottom centre, where jump dust comes from
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.body.bottom())
    }

    pub fn centre(&self) -> Vec2 {
        self.rect().center()
    }

    /// One tick of gravity and animation, scaled by `factor`
    pub fn update(&mut self, tuning: &RunnerTuning, factor: f32, record_trail: bool) {
        if record_trail {
            self.trail.push_back(Vec2::new(self.x, self.body.y));
            while self.trail.len() > TRAIL_LEN {
                self.trail.pop_front();
            }
        }

        self.body.step(tuning.gravity, self.timeline.ground_y(), factor);

        self.anim += 0.2 * factor;
        if self.anim >= ANIM_FRAMES {
            self.anim = 0.0;
        }
    }
}

/// A spiked block scrolling toward the runners
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub timeline: Timeline,
    pub x: f32,
    /// Top of the block (its timeline's ground line)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Spike pulse phase (radians)
    pub pulse: f32,
}

impl Obstacle {
    pub fn new(timeline: Timeline, x: f32, width: f32, height: f32) -> Self {
        Self {
            timeline,
            x,
            y: timeline.ground_y(),
            width,
            height,
            pulse: 0.0,
        }
    }

    /// Collision box, spikes included
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x,
            self.y - SPIKE_HEIGHT,
            self.width,
            self.height + SPIKE_HEIGHT,
        )
    }

    pub fn update(&mut self, speed: f32, factor: f32) {
        self.x -= speed * factor;
        self.pulse = (self.pulse + 0.05 * factor) % TAU;
    }

    /// Fully scrolled off the left edge
    pub fn off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Time factor for the smallest gap to an obstacle ahead, or `None` when
/// nothing is close enough to slow time. Always within `[slow_mo_factor, 1]`.
pub fn slow_motion_factor(gap: f32, tuning: &RunnerTuning) -> Option<f32> {
    let min = tuning.slow_mo_factor;
    (gap < tuning.slow_mo_distance)
        .then(|| (min + (1.0 - min) * (gap / tuning.slow_mo_distance)).clamp(min, 1.0))
}

/// Strength of the slow-motion visual effects (0 at normal speed)
pub fn time_distortion(factor: f32) -> f32 {
    (1.0 - factor).clamp(0.0, 1.0)
}

/// Next milestone reached by `score`, if it is beyond `current`
pub fn milestone_for(score: f32, current: Option<u32>) -> Option<u32> {
    let reached = score.max(0.0) as u32;
    MILESTONES
        .iter()
        .map(|(m, _)| *m)
        .find(|m| reached >= *m && current.is_none_or(|c| *m > c))
}

/// Banner text for a milestone
pub fn milestone_message(milestone: u32) -> Option<&'static str> {
    MILESTONES
        .iter()
        .find(|(m, _)| *m == milestone)
        .map(|(_, text)| *text)
}

/// Complete Time Runners state
#[derive(Debug, Clone)]
pub struct RunnerState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: RunnerTuning,
    pub phase: GamePhase,
    /// Story page being shown while in the intro
    pub intro_page: usize,
    pub present: Runner,
    pub past: Runner,
    /// Present-runner jump input, replayed to the past runner
    pub replay: ReplayBuffer<bool>,
    pub obstacles: Arena<Obstacle>,
    pub particles: Arena<Particle>,
    /// Live particle cap (from the quality preset)
    pub particle_cap: usize,
    pub spawn_timer: f32,
    pub spawn_delay: f32,
    /// Accumulates the time factor every playing tick
    pub score: f32,
    pub milestone: Option<u32>,
    /// Remaining banner time for the current milestone
    pub milestone_timer: f32,
    /// Scale applied to every per-tick delta (1 = normal speed)
    pub time_factor: f32,
    pub slow_mo_active: bool,
    /// Ticks spent playing this run
    pub ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl RunnerState {
    /// Default live particle cap
    pub const PARTICLE_CAP: usize = 500;

    /// New run showing the intro. `None` if the replay delay is zero ticks.
    pub fn new(seed: u64, tuning: RunnerTuning) -> Option<Self> {
        let replay = ReplayBuffer::new(tuning.replay_delay_ticks, false)?;
        Some(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn_delay: tuning.first_spawn_delay,
            tuning,
            phase: GamePhase::Intro,
            intro_page: 0,
            present: Runner::new(Timeline::Present),
            past: Runner::new(Timeline::Past),
            replay,
            obstacles: Arena::new(),
            particles: Arena::new(),
            particle_cap: Self::PARTICLE_CAP,
            spawn_timer: 0.0,
            score: 0.0,
            milestone: None,
            milestone_timer: 0.0,
            time_factor: 1.0,
            slow_mo_active: false,
            ticks: 0,
            events: Vec::new(),
        })
    }

    /// Back to the start of a run (the intro is not shown again)
    pub fn reset(&mut self) {
        self.present = Runner::new(Timeline::Present);
        self.past = Runner::new(Timeline::Past);
        self.replay.reset(false);
        self.obstacles.clear();
        self.particles.clear();
        self.spawn_timer = 0.0;
        self.spawn_delay = self.tuning.first_spawn_delay;
        self.score = 0.0;
        self.milestone = None;
        self.milestone_timer = 0.0;
        self.time_factor = 1.0;
        self.slow_mo_active = false;
        self.ticks = 0;
        self.events.clear();
    }

    pub fn runner(&self, timeline: Timeline) -> &Runner {
        match timeline {
            Timeline::Present => &self.present,
            Timeline::Past => &self.past,
        }
    }

    pub fn runner_mut(&mut self, timeline: Timeline) -> &mut Runner {
        match timeline {
            Timeline::Present => &mut self.present,
            Timeline::Past => &mut self.past,
        }
    }

    /// Smallest gap between a runner and an obstacle ahead of it in its own
    /// timeline, across both timelines
    pub fn nearest_gap(&self) -> Option<f32> {
        self.obstacles
            .iter()
            .filter_map(|o| {
                let runner = self.runner(o.timeline);
                (o.x > runner.x).then(|| o.x - (runner.x + runner.width))
            })
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Current distortion strength for effects
    pub fn distortion(&self) -> f32 {
        if self.slow_mo_active {
            time_distortion(self.time_factor)
        } else {
            0.0
        }
    }

    /// Queue `count` particles at `pos`
    pub fn burst(&mut self, pos: Vec2, color: Rgb, timeline: Timeline, count: usize) {
        for _ in 0..count {
            let particle = Particle::spawn(pos, color, timeline, &mut self.rng);
            self.particles.spawn(particle);
        }
    }

    /// Random ambient particles while time is slowed
    pub fn maybe_distort(&mut self) {
        if !self.rng.random_bool(self.tuning.distortion_chance) {
            return;
        }
        for _ in 0..self.tuning.distortion_particles {
            let timeline = if self.rng.random_bool(0.5) {
                Timeline::Present
            } else {
                Timeline::Past
            };
            let (top, bottom) = timeline.band();
            let pos = Vec2::new(
                self.rng.random_range(0.0..=SCREEN_WIDTH),
                self.rng.random_range(top..=bottom),
            );
            let color = match timeline {
                Timeline::Present => DISTORTION_BLUE,
                Timeline::Past => DISTORTION_RED,
            };
            let particle = Particle::spawn(pos, color, timeline, &mut self.rng);
            self.particles.spawn(particle);
        }
    }

    /// Advance the spawn timer; queues an identical obstacle in each
    /// timeline when it fires
    pub fn advance_spawner(&mut self, factor: f32) {
        self.spawn_timer += factor;
        if self.spawn_timer < self.spawn_delay {
            return;
        }
        self.spawn_timer = 0.0;
        let (lo, hi) = self.tuning.spawn_delay;
        self.spawn_delay = self.rng.random_range(lo..=hi) as f32;

        let (lo, hi) = self.tuning.obstacle_width;
        let width = self.rng.random_range(lo..=hi) as f32;
        for timeline in [Timeline::Present, Timeline::Past] {
            self.obstacles.spawn(Obstacle::new(
                timeline,
                SCREEN_WIDTH,
                width,
                self.tuning.obstacle_height,
            ));
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
