//! Shadow Tag scene: stars, shadows, the light orb and the HUD

use glam::Vec2;
use rand::Rng;

use super::canvas::Canvas;
use super::font::Align;
use super::vertex::{colors, rgb, rgba};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::light::{LIGHT_YELLOW, light_color};
use crate::sim::tag::{Player, Shadow, TagState};
use crate::sim::{GamePhase, Rect, Rgb};
use crate::ticks_to_millis;

const SHADOW_GRAY: Rgb = [50, 50, 50];
const METER: Rect = Rect::new(20.0, 20.0, 200.0, 20.0);
const HUD_RIGHT: f32 = SCREEN_WIDTH - 20.0;

const TEXT: f32 = 2.0;
const TITLE: f32 = 4.0;

/// Presentation switches for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagView {
    /// Frame counter driving time-based effects
    pub frame: u64,
    /// Pulsing/flicker allowed
    pub pulse: bool,
    pub starfield: bool,
    pub controls_hint: bool,
}

impl Default for TagView {
    fn default() -> Self {
        Self {
            frame: 0,
            pulse: true,
            starfield: true,
            controls_hint: true,
        }
    }
}

/// Width of the filled part of the light meter
pub fn meter_fill_width(fraction: f32) -> f32 {
    METER.w * fraction.clamp(0.0, 1.0)
}

/// The controls hint shows for the first 3 seconds of every 10
pub fn controls_hint_visible(frame: u64) -> bool {
    ticks_to_millis(frame) % 10_000 < 3_000
}

/// Build the whole frame
pub fn draw(state: &TagState, view: &TagView, rng: &mut impl Rng) -> Canvas {
    let mut canvas = Canvas::with_capacity(8192);

    if view.starfield {
        draw_stars(&mut canvas, rng);
    }

    if state.phase == GamePhase::Intro {
        draw_intro(&mut canvas, view);
        return canvas;
    }

    for shadow in &state.shadows {
        draw_shadow(&mut canvas, shadow, rng);
    }

    let color = light_color(state.player.light.percent(), view.frame, view.pulse);
    draw_player(&mut canvas, &state.player, color);
    draw_hud(&mut canvas, state, view, color);

    match state.phase {
        GamePhase::Paused => {
            canvas.overlay(rgba(colors::BLACK, 150.0 / 255.0));
            canvas.centered_text("PAUSED", 260.0, TITLE, rgb(colors::WHITE));
            canvas.centered_text("Press P to resume", 320.0, TEXT, rgb(LIGHT_YELLOW));
        }
        GamePhase::GameOver => {
            canvas.overlay(rgba(colors::BLACK, 150.0 / 255.0));
            canvas.centered_text("DARKNESS CONSUMES YOU", 220.0, TITLE, rgb(colors::WHITE));
            canvas.centered_text(
                &format!("Final Score: {}", state.score),
                280.0,
                TEXT,
                rgb(colors::WHITE),
            );
            canvas.centered_text("Press SPACE to restart", 340.0, TEXT, rgb(LIGHT_YELLOW));
        }
        GamePhase::Won => {
            canvas.overlay(rgba(colors::BLACK, 150.0 / 255.0));
            canvas.centered_text("LEVEL COMPLETE!", 220.0, TITLE, rgb(LIGHT_YELLOW));
            canvas.centered_text(
                &format!("Score: {}", state.score),
                280.0,
                TEXT,
                rgb(colors::WHITE),
            );
            canvas.centered_text(
                &format!("Time: {} seconds", state.elapsed_secs()),
                310.0,
                TEXT,
                rgb(colors::WHITE),
            );
            canvas.centered_text("Press SPACE for next level", 360.0, TEXT, rgb(LIGHT_YELLOW));
        }
        GamePhase::Intro | GamePhase::Playing => {}
    }

    canvas
}

fn draw_stars(canvas: &mut Canvas, rng: &mut impl Rng) {
    for _ in 0..20 {
        let pos = Vec2::new(
            rng.random_range(0.0..SCREEN_WIDTH),
            rng.random_range(0.0..SCREEN_HEIGHT),
        );
        let size = rng.random_range(1..=2) as f32;
        let b: u8 = rng.random_range(5..=20);
        canvas.circle(pos, size, rgb([b, b, b]));
    }
}

fn draw_intro(canvas: &mut Canvas, view: &TagView) {
    canvas.glow(
        Vec2::new(SCREEN_WIDTH / 2.0, 200.0),
        120.0,
        rgba(LIGHT_YELLOW, 0.5),
        rgba(LIGHT_YELLOW, 0.0),
    );
    canvas.centered_text("SHADOW TAG", 120.0, 6.0, rgb(LIGHT_YELLOW));

    let lines = [
        "Your light is fading.",
        "Tag every shadow before the darkness wins.",
        "",
        "Arrow keys: move     P: pause",
        "M: music     S: sound effects     Esc: quit",
    ];
    for (i, line) in lines.iter().enumerate() {
        canvas.centered_text(line, 300.0 + i as f32 * 30.0, TEXT, rgb(colors::WHITE));
    }

    let alpha = if view.pulse {
        let t = ticks_to_millis(view.frame) as f32 * 0.005;
        0.6 + 0.4 * (t.sin() + 1.0) / 2.0
    } else {
        1.0
    };
    canvas.centered_text("Press any key to start", 500.0, TEXT, rgba(LIGHT_YELLOW, alpha));
}

fn draw_shadow(canvas: &mut Canvas, shadow: &Shadow, rng: &mut impl Rng) {
    if shadow.tagged {
        let alpha = shadow.fade as f32 / 255.0;
        if alpha > 0.0 {
            canvas.circle(shadow.pos, shadow.radius, rgba(SHADOW_GRAY, alpha));
        }
        return;
    }

    canvas.circle(shadow.pos, shadow.radius, rgb(SHADOW_GRAY));
    // Shifting black specks for texture
    let spread = shadow.radius / 2.0;
    for _ in 0..3 {
        let offset = Vec2::new(
            rng.random_range(-spread..=spread),
            rng.random_range(-spread..=spread),
        );
        let size = rng.random_range(2..=4) as f32;
        canvas.circle(shadow.pos + offset, size, rgb(colors::BLACK));
    }
}

fn draw_player(canvas: &mut Canvas, player: &Player, color: Rgb) {
    let radius = player.light.radius();

    // Light pool: white-hot in the middle, fading out in the light colour
    canvas.glow(player.pos, radius, rgba(colors::WHITE, 150.0 / 255.0), rgba(color, 0.0));

    // Soft halo, the orb and its white core
    canvas.glow(
        player.pos,
        player.radius * 2.0,
        rgba(color, 0.25),
        rgba(color, 0.0),
    );
    canvas.circle(player.pos, player.radius, rgb(color));
    canvas.circle(player.pos, player.radius / 2.0, rgb(colors::WHITE));
}

fn draw_hud(canvas: &mut Canvas, state: &TagState, view: &TagView, color: Rgb) {
    canvas.rect(METER, rgb(colors::GRAY));
    let fill = meter_fill_width(state.player.light.fraction());
    canvas.rect(Rect::new(METER.x, METER.y, fill, METER.h), rgb(color));
    canvas.text(
        "Light",
        Vec2::new(METER.x, 45.0),
        TEXT,
        rgb(colors::WHITE),
        Align::Left,
    );

    let lines = [
        format!("Time: {}s", state.elapsed_secs()),
        format!("Score: {}", state.score),
        format!("Level: {}", state.level),
        format!("Shadows: {}/{}", state.active_shadows(), state.shadow_total),
    ];
    for (i, line) in lines.iter().enumerate() {
        canvas.text(
            line,
            Vec2::new(HUD_RIGHT, 20.0 + i as f32 * 30.0),
            TEXT,
            rgb(colors::WHITE),
            Align::Right,
        );
    }

    if view.controls_hint && controls_hint_visible(view.frame) {
        canvas.text(
            "Press M to toggle music, S to toggle sound effects",
            Vec2::new(20.0, SCREEN_HEIGHT - 30.0),
            TEXT,
            rgb(colors::HINT_GRAY),
            Align::Left,
        );
    }
}
