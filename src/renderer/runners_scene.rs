//! Time Runners scene: story pages, the split-screen timelines and the
//! temporal collapse screen

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::f32::consts::TAU;

use super::canvas::Canvas;
use super::font::{self, Align};
use super::vertex::{colors, rgb, rgba};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::particle::Timeline;
use crate::sim::runners::state::{GROUND_DEPTH, INTRO_PAGES, OBSTACLE_RED, TIMELINE_SPLIT};
use crate::sim::runners::{Obstacle, Runner, RunnerState, milestone_message};
use crate::sim::{GamePhase, Particle, Rect, Rgb};
use crate::ticks_to_millis;

const TEXT: f32 = 2.0;
const SMALL: f32 = 1.5;
const LARGE: f32 = 4.0;

const STORY_BOX: Rect = Rect::new(100.0, 150.0, 600.0, 300.0);
const GAME_OVER_BOX: Rect = Rect::new(150.0, 175.0, 500.0, 250.0);

/// Story shown one page at a time before the first run
pub const STORY: [&[&str]; INTRO_PAGES] = [
    &[
        "THE YEAR IS 2157.",
        "DR. ELARA CHEN, A BRILLIANT QUANTUM PHYSICIST,",
        "HAS DISCOVERED A WAY TO MANIPULATE THE FABRIC OF TIME.",
        "",
        "A CATASTROPHIC EVENT IS ABOUT TO DESTROY HUMANITY.",
    ],
    &[
        "USING HER EXPERIMENTAL TECHNOLOGY,",
        "DR. CHEN CREATES A TEMPORAL PARADOX.",
        "",
        "BY RUNNING THROUGH BOTH TIMELINES SIMULTANEOUSLY -",
        "ONE IN THE PRESENT AND ONE 2 SECONDS IN THE PAST -",
        "SHE HOPES TO FIND THE EXACT MOMENT TO PREVENT THE DISASTER.",
    ],
    &[
        "BUT THE UNIVERSE DOESN'T LIKE PARADOXES...",
        "REALITY ITSELF IS FIGHTING BACK WITH TEMPORAL ANOMALIES.",
        "",
        "CAN YOU HELP DR. CHEN NAVIGATE BOTH TIMELINES",
        "LONG ENOUGH TO SAVE HUMANITY FROM EXTINCTION?",
    ],
];

/// Presentation switches for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerView {
    /// Frame counter driving time-based effects
    pub frame: u64,
    /// Pulsing/flicker allowed
    pub pulse: bool,
    pub starfield: bool,
}

impl Default for RunnerView {
    fn default() -> Self {
        Self {
            frame: 0,
            pulse: true,
            starfield: true,
        }
    }
}

impl RunnerView {
    /// `(sin(ms * rate) + 1) / 2`, or a steady 1 with pulsing off
    fn wave(&self, rate: f32) -> f32 {
        if !self.pulse {
            return 1.0;
        }
        let ms = ticks_to_millis(self.frame) as f32;
        ((ms * rate).sin() + 1.0) / 2.0
    }
}

/// Largest scale, up to `preferred`, at which `text` fits in `max_width`
pub fn fit_scale(text: &str, max_width: f32, preferred: f32) -> f32 {
    let width = font::text_width(text, 1.0);
    if width <= 0.0 {
        return preferred;
    }
    (max_width / width).min(preferred)
}

/// Banner opacity for the remaining milestone time
pub fn banner_alpha(timer: f32) -> f32 {
    (timer * 2.0).clamp(0.0, 255.0) / 255.0
}

/// Build the whole frame
pub fn draw(state: &RunnerState, view: &RunnerView, rng: &mut impl Rng) -> Canvas {
    let mut canvas = Canvas::with_capacity(16384);

    if state.phase == GamePhase::Intro {
        draw_intro(&mut canvas, state.intro_page, view, rng);
        return canvas;
    }

    draw_timelines(&mut canvas, state, view, rng);
    draw_labels(&mut canvas, state, view);

    for particle in &state.particles {
        draw_particle(&mut canvas, particle);
    }

    let distortion = state.distortion();
    for obstacle in &state.obstacles {
        draw_obstacle(&mut canvas, obstacle, distortion);
    }
    for runner in [&state.present, &state.past] {
        draw_runner(&mut canvas, runner, distortion, view);
    }

    draw_score(&mut canvas, state);

    match state.phase {
        GamePhase::Paused => {
            canvas.overlay(rgba(colors::BLACK, 150.0 / 255.0));
            canvas.centered_text("TIME FROZEN", 260.0, LARGE, rgb(colors::YELLOW));
            canvas.centered_text("PRESS P TO RESUME", 320.0, TEXT, rgb(colors::WHITE));
        }
        GamePhase::GameOver => draw_collapse(&mut canvas, state, view, rng),
        GamePhase::Intro | GamePhase::Playing | GamePhase::Won => {}
    }

    canvas
}

fn draw_intro(canvas: &mut Canvas, page: usize, view: &RunnerView, rng: &mut impl Rng) {
    if view.starfield {
        for _ in 0..20 {
            let pos = Vec2::new(
                rng.random_range(0.0..=SCREEN_WIDTH),
                rng.random_range(0.0..=SCREEN_HEIGHT),
            );
            let size = rng.random_range(1..=3) as f32;
            let alpha = rng.random_range(50..=200) as f32 / 255.0;
            let color = [colors::BLUE, colors::RED, colors::PURPLE]
                .choose(rng)
                .copied()
                .unwrap_or(colors::BLUE);
            canvas.circle(pos, size, rgba(color, alpha));
        }

        // Decorative time lines
        for _ in 0..5 {
            let width: f32 = rng.random_range(50.0..=200.0);
            let x = rng.random_range(0.0..=SCREEN_WIDTH - width);
            let y = rng.random_range(0.0..=SCREEN_HEIGHT);
            let alpha = rng.random_range(20..=80) as f32 / 255.0;
            canvas.rect(Rect::new(x, y, width, 1.0), rgba(colors::WHITE, alpha));
        }
    }

    canvas.overlay(rgba(colors::BLACK, 150.0 / 255.0));

    let title = "TIME RUNNERS: PARADOX SHIFT";
    let scale = fit_scale(title, SCREEN_WIDTH - 40.0, LARGE);
    let width = font::text_width(title, scale);
    canvas.text(
        title,
        Vec2::new(SCREEN_WIDTH / 2.0 + 2.0, 52.0),
        scale,
        rgb(colors::PURPLE),
        Align::Center,
    );
    canvas.centered_text(title, 50.0, scale, rgb(colors::YELLOW));
    canvas.line(
        Vec2::new((SCREEN_WIDTH - width) / 2.0, 100.0),
        Vec2::new((SCREEN_WIDTH + width) / 2.0, 100.0),
        2.0,
        rgb(colors::YELLOW),
    );

    canvas.rect(STORY_BOX, rgba([0, 0, 50], 150.0 / 255.0));
    canvas.outline(STORY_BOX, 2.0, rgba([100, 100, 255], 100.0 / 255.0));

    let lines = STORY.get(page).copied().unwrap_or_default();
    let mut y = STORY_BOX.y + 40.0;
    for line in lines {
        if !line.is_empty() {
            let scale = fit_scale(line, STORY_BOX.w - 40.0, TEXT);
            canvas.centered_text(line, y, scale, rgb(colors::WHITE));
        }
        y += 35.0;
    }

    canvas.text(
        &format!("PAGE {}/{}", page + 1, INTRO_PAGES),
        Vec2::new(SCREEN_WIDTH - 20.0, SCREEN_HEIGHT - 40.0),
        SMALL,
        rgb(colors::LIGHT_GRAY),
        Align::Right,
    );

    let alpha = (155.0 + 100.0 * view.wave(0.005)) / 255.0;
    canvas.centered_text(
        "PRESS ANY KEY TO CONTINUE",
        SCREEN_HEIGHT - 100.0,
        TEXT,
        rgba(colors::YELLOW, alpha),
    );
}

fn draw_timelines(canvas: &mut Canvas, state: &RunnerState, view: &RunnerView, rng: &mut impl Rng) {
    let present_ground = Timeline::Present.ground_y();
    let past_ground = Timeline::Past.ground_y();

    // Present: dark to light blue sky over green ground
    canvas.gradient(
        Rect::new(0.0, 0.0, SCREEN_WIDTH, present_ground),
        rgb([0, 0, 20]),
        rgb([0, 0, 100]),
    );
    canvas.rect(
        Rect::new(0.0, present_ground, SCREEN_WIDTH, GROUND_DEPTH),
        rgb(colors::GREEN),
    );
    ground_texture(canvas, present_ground, colors::DARK_GREEN, rng);

    // Past: gray gradient over gray ground
    canvas.gradient(
        Rect::new(0.0, TIMELINE_SPLIT, SCREEN_WIDTH, SCREEN_HEIGHT - TIMELINE_SPLIT),
        rgb([20, 20, 20]),
        rgb([80, 80, 80]),
    );
    canvas.rect(
        Rect::new(0.0, past_ground, SCREEN_WIDTH, GROUND_DEPTH),
        rgb(colors::GRAY),
    );
    ground_texture(canvas, past_ground, colors::DARK_GRAY, rng);

    if view.starfield {
        for _ in 0..10 {
            for (top, bottom) in [(0.0, present_ground), (TIMELINE_SPLIT, past_ground)] {
                let pos = Vec2::new(
                    rng.random_range(0.0..=SCREEN_WIDTH),
                    rng.random_range(top..=bottom),
                );
                let size = rng.random_range(1..=2) as f32;
                canvas.circle(pos, size, rgb(colors::WHITE));
            }
        }
    }

    if state.slow_mo_active {
        canvas.rect(
            Rect::new(0.0, TIMELINE_SPLIT - 5.0, SCREEN_WIDTH, 10.0),
            rgba([200, 200, 255], 150.0 / 255.0),
        );
    }
    canvas.line(
        Vec2::new(0.0, TIMELINE_SPLIT),
        Vec2::new(SCREEN_WIDTH, TIMELINE_SPLIT),
        2.0,
        rgb(colors::WHITE),
    );
}

fn ground_texture(canvas: &mut Canvas, ground_y: f32, color: Rgb, rng: &mut impl Rng) {
    for _ in 0..20 {
        let x = rng.random_range(0.0..=SCREEN_WIDTH);
        let y = ground_y + rng.random_range(5.0..=55.0);
        let w = rng.random_range(5.0..=20.0);
        let h = rng.random_range(2.0..=5.0);
        canvas.rect(Rect::new(x, y, w, h), rgb(color));
    }
}

fn draw_labels(canvas: &mut Canvas, state: &RunnerState, view: &RunnerView) {
    let labels = [
        (10.0, "PRESENT", [0, 0, 100], colors::BLUE),
        (TIMELINE_SPLIT + 10.0, "PAST (-2s)", [100, 0, 0], colors::RED),
    ];
    for (y, label, fill, border) in labels {
        canvas.panel(
            Rect::new(10.0, y, 120.0, 30.0),
            rgba(fill, 150.0 / 255.0),
            rgb(border),
        );
        canvas.text(label, Vec2::new(20.0, y + 10.0), SMALL, rgb(colors::WHITE), Align::Left);
    }

    if state.slow_mo_active {
        let alpha = (100.0 + 50.0 * view.wave(0.01)) / 255.0;
        canvas.panel(
            Rect::new(SCREEN_WIDTH / 2.0 - 175.0, 10.0, 350.0, 30.0),
            rgba(colors::PURPLE, alpha),
            rgb(colors::PURPLE),
        );
        canvas.centered_text("TEMPORAL DISTORTION ACTIVE", 18.0, TEXT, rgb(colors::WHITE));
    }
}

fn draw_particle(canvas: &mut Canvas, particle: &Particle) {
    if particle.is_dead() {
        return;
    }
    canvas.circle(
        particle.pos,
        particle.pulsed_size(),
        rgba(particle.color, particle.alpha()),
    );
}

fn draw_obstacle(canvas: &mut Canvas, obstacle: &Obstacle, distortion: f32) {
    let color = rgb(OBSTACLE_RED);
    canvas.rect(
        Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height),
        color,
    );

    let lift = obstacle.pulse.sin() * 3.0 * distortion;
    let spikes = (obstacle.width / 10.0).floor() as usize;
    for i in 0..spikes {
        let x = obstacle.x + i as f32 * 10.0;
        canvas.triangle(
            Vec2::new(x, obstacle.y),
            Vec2::new(x + 5.0, obstacle.y - 10.0 - lift),
            Vec2::new(x + 10.0, obstacle.y),
            color,
        );
    }

    if distortion > 0.0 {
        canvas.rect(
            Rect::new(obstacle.x - 5.0, obstacle.y, obstacle.width + 10.0, obstacle.height),
            rgba(colors::YELLOW, distortion * 100.0 / 255.0),
        );
    }
}

/// Runner colour, brightened and flickering while time is distorted
fn runner_color(base: Rgb, distortion: f32, view: &RunnerView) -> Rgb {
    if distortion <= 0.0 {
        return base;
    }
    let flicker = if view.pulse {
        let ms = ticks_to_millis(view.frame) as f32;
        (ms * 0.01).sin().abs()
    } else {
        0.5
    };
    let boost = ((150.0 + 100.0 * flicker) / 3.0) as u8;
    base.map(|c| c.saturating_add(boost))
}

fn draw_runner(canvas: &mut Canvas, runner: &Runner, distortion: f32, view: &RunnerView) {
    let half = runner.width / 2.0;

    if distortion > 0.0 && !runner.trail.is_empty() {
        let n = runner.trail.len() as f32;
        for (i, p) in runner.trail.iter().enumerate() {
            let alpha = (100.0 * (i as f32 / n) * distortion) / 255.0;
            let c = rgba(runner.color, alpha);
            canvas.circle(Vec2::new(p.x + half, p.y + 10.0), 8.0, c);
            canvas.line(
                Vec2::new(p.x + half, p.y + 20.0),
                Vec2::new(p.x + half, p.y + 30.0),
                2.0,
                c,
            );
        }
    }

    let color = rgb(runner_color(runner.color, distortion, view));
    let cx = runner.x + half;
    let y = runner.body.y;

    // Head and body
    canvas.circle(Vec2::new(cx, y + 10.0), 10.0, color);
    canvas.line(Vec2::new(cx, y + 20.0), Vec2::new(cx, y + 30.0), 2.0, color);

    let shoulder = Vec2::new(cx, y + 25.0);
    let arm = if runner.body.airborne {
        -0.2_f32
    } else {
        (runner.anim * 2.0).sin() * 0.5
    };
    let arm_y = y + 20.0 - 5.0 * arm.sin();
    canvas.line(shoulder, Vec2::new(cx - 10.0 * arm.cos(), arm_y), 2.0, color);
    canvas.line(shoulder, Vec2::new(cx + 10.0 * arm.cos(), arm_y), 2.0, color);

    let hip = Vec2::new(cx, y + 30.0);
    if runner.body.airborne {
        canvas.line(hip, Vec2::new(cx - 8.0, y + 35.0), 2.0, color);
        canvas.line(hip, Vec2::new(cx + 8.0, y + 35.0), 2.0, color);
    } else {
        let leg = (runner.anim * 2.0).sin();
        canvas.line(
            hip,
            Vec2::new(cx - 10.0 * leg.cos(), y + 40.0 - 5.0 * leg.sin()),
            2.0,
            color,
        );
        canvas.line(
            hip,
            Vec2::new(cx + 10.0 * leg.cos(), y + 40.0 + 5.0 * leg.sin()),
            2.0,
            color,
        );
    }

    if distortion > 0.0 {
        canvas.circle(
            Vec2::new(cx, y + 10.0),
            12.0,
            [color[0], color[1], color[2], distortion * 100.0 / 255.0],
        );
    }
}

fn draw_score(canvas: &mut Canvas, state: &RunnerState) {
    canvas.panel(
        Rect::new(SCREEN_WIDTH - 160.0, 10.0, 150.0, 30.0),
        rgba(colors::BLACK, 150.0 / 255.0),
        rgb(colors::WHITE),
    );
    canvas.text(
        &format!("SCORE: {}", state.score as u64),
        Vec2::new(SCREEN_WIDTH - 150.0, 20.0),
        SMALL,
        rgb(colors::WHITE),
        Align::Left,
    );

    if state.milestone_timer > 0.0 {
        let message = state.milestone.and_then(milestone_message);
        if let Some(message) = message {
            let banner = Rect::new(SCREEN_WIDTH / 2.0 - 250.0, TIMELINE_SPLIT / 2.0 - 20.0, 500.0, 40.0);
            canvas.panel(
                banner,
                rgba([50, 50, 0], banner_alpha(state.milestone_timer)),
                rgb(colors::YELLOW),
            );
            let scale = fit_scale(message, banner.w - 20.0, TEXT);
            canvas.centered_text(message, banner.y + 13.0, scale, rgb(colors::YELLOW));
        }
    }
}

fn draw_collapse(canvas: &mut Canvas, state: &RunnerState, view: &RunnerView, rng: &mut impl Rng) {
    let pulse = if view.pulse {
        view.wave(0.003) / 2.0 + 0.5
    } else {
        1.0
    };
    canvas.overlay(rgba([50, 0, 0], 150.0 * pulse / 255.0));

    canvas.rect(GAME_OVER_BOX, rgba(colors::BLACK, 200.0 / 255.0));
    canvas.outline(GAME_OVER_BOX, 2.0, rgb(colors::RED));

    // Fracture lines across the box
    for _ in 0..10 {
        let start = Vec2::new(
            GAME_OVER_BOX.x + rng.random_range(0.0..=GAME_OVER_BOX.w),
            GAME_OVER_BOX.y + rng.random_range(0.0..=GAME_OVER_BOX.h),
        );
        let length: f32 = rng.random_range(20.0..=100.0);
        let angle: f32 = rng.random_range(0.0..TAU);
        let end = start + Vec2::new(angle.cos(), angle.sin()) * length;
        canvas.line(start, end, 1.0, rgba(colors::RED, 150.0 / 255.0));
    }

    canvas.centered_text("TEMPORAL COLLAPSE", SCREEN_HEIGHT / 2.0 - 80.0, LARGE, rgb(colors::RED));
    canvas.centered_text(
        &format!("TIMELINE STABILITY: {}", state.score as u64),
        SCREEN_HEIGHT / 2.0 - 20.0,
        TEXT,
        rgb(colors::WHITE),
    );
    canvas.centered_text(
        "PRESS SPACE TO RESTART EXPERIMENT",
        SCREEN_HEIGHT / 2.0 + 40.0,
        TEXT,
        rgb(colors::YELLOW),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::runners::{TickInput, tick};
    use crate::tuning::RunnerTuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing() -> RunnerState {
        let mut state = RunnerState::new(5, RunnerTuning::default()).unwrap();
        let press = TickInput {
            any_key: true,
            ..Default::default()
        };
        for _ in 0..INTRO_PAGES {
            tick(&mut state, &press);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_story_lines_fit_the_box() {
        for page in STORY {
            for line in page {
                let scale = fit_scale(line, STORY_BOX.w - 40.0, TEXT);
                assert!(font::text_width(line, scale) <= STORY_BOX.w - 40.0 + 1e-3);
                assert!(scale <= TEXT);
            }
        }
        assert_eq!(fit_scale("PRESENT", 500.0, 2.0), 2.0);
        assert_eq!(fit_scale("", 10.0, 2.0), 2.0);
    }

    #[test]
    fn test_banner_alpha() {
        assert_eq!(banner_alpha(0.0), 0.0);
        assert_eq!(banner_alpha(60.0), 120.0 / 255.0);
        assert_eq!(banner_alpha(180.0), 1.0);
    }

    #[test]
    fn test_runner_color_flicker() {
        let view = RunnerView::default();
        assert_eq!(runner_color([0, 0, 255], 0.0, &view), [0, 0, 255]);
        let bright = runner_color([0, 0, 255], 0.3, &view);
        assert!(bright[0] >= 50);
        assert_eq!(bright[2], 255);
    }

    #[test]
    fn test_every_phase_draws() {
        let mut rng = Pcg32::seed_from_u64(9);
        let view = RunnerView::default();

        let mut intro = RunnerState::new(5, RunnerTuning::default()).unwrap();
        for page in 0..INTRO_PAGES {
            intro.intro_page = page;
            assert!(!draw(&intro, &view, &mut rng).is_empty());
        }

        let mut state = playing();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        for phase in [GamePhase::Playing, GamePhase::Paused, GamePhase::GameOver] {
            state.phase = phase;
            let canvas = draw(&state, &view, &mut rng);
            assert!(!canvas.is_empty());
            assert_eq!(canvas.len() % 3, 0);
        }
    }

    #[test]
    fn test_slow_motion_adds_effects() {
        let mut rng = Pcg32::seed_from_u64(4);
        let view = RunnerView {
            starfield: false,
            ..Default::default()
        };
        let mut state = playing();
        let calm = draw(&state, &view, &mut rng).len();

        state.slow_mo_active = true;
        state.time_factor = 0.6;
        state.present.trail.push_back(Vec2::new(100.0, 200.0));
        let slowed = draw(&state, &view, &mut rng).len();
        assert!(slowed > calm);
    }
}
