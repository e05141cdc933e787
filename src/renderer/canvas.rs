//! Per-frame vertex builder
//!
//! Scenes draw into a `Canvas` in painter's order; the result is a single
//! triangle list handed to `RenderState::render`.

use glam::Vec2;

use super::font::{self, Align};
use super::shapes;
use super::vertex::Vertex;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

#[derive(Debug, Default, Clone)]
pub struct Canvas {
    vertices: Vec<Vertex>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn rect(&mut self, r: Rect, color: [f32; 4]) {
        self.vertices.extend(shapes::rect(r.x, r.y, r.w, r.h, color));
    }

    pub fn gradient(&mut self, r: Rect, top: [f32; 4], bottom: [f32; 4]) {
        self.vertices
            .extend(shapes::gradient_rect(r.x, r.y, r.w, r.h, top, bottom));
    }

    pub fn outline(&mut self, r: Rect, thickness: f32, color: [f32; 4]) {
        self.vertices
            .extend(shapes::rect_outline(r.x, r.y, r.w, r.h, thickness, color));
    }

    /// Filled box with a border, as used by labels and banners
    pub fn panel(&mut self, r: Rect, fill: [f32; 4], border: [f32; 4]) {
        self.rect(r, fill);
        self.outline(r, 1.0, border);
    }

    /// Full-screen translucent overlay
    pub fn overlay(&mut self, color: [f32; 4]) {
        self.rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT), color);
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::circle(
            center,
            radius,
            color,
            shapes::segments_for(radius),
        ));
    }

    pub fn glow(&mut self, center: Vec2, radius: f32, inner: [f32; 4], outer: [f32; 4]) {
        if radius <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::radial_gradient(
            center,
            radius,
            inner,
            outer,
            shapes::segments_for(radius),
        ));
    }

    pub fn ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::ring(
            center,
            inner,
            outer,
            color,
            shapes::segments_for(outer),
        ));
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::triangle(a, b, c, color));
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    /// One line of text; `pos.y` is the top, `pos.x` is the anchor for `align`
    pub fn text(&mut self, text: &str, pos: Vec2, scale: f32, color: [f32; 4], align: Align) {
        let x = font::aligned_x(text, pos.x, scale, align);
        self.vertices
            .extend(font::text(text, Vec2::new(x, pos.y), scale, color));
    }

    /// Text centred horizontally on the screen
    pub fn centered_text(&mut self, text: &str, y: f32, scale: f32, color: [f32; 4]) {
        self.text(
            text,
            Vec2::new(SCREEN_WIDTH / 2.0, y),
            scale,
            color,
            Align::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_order_is_kept() {
        let mut canvas = Canvas::new();
        canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0), [1.0, 0.0, 0.0, 1.0]);
        canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0), [0.0, 1.0, 0.0, 1.0]);
        let v = canvas.vertices();
        assert_eq!(v.len(), 12);
        assert_eq!(v[0].color[0], 1.0);
        assert_eq!(v[11].color[1], 1.0);
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let mut canvas = Canvas::new();
        canvas.circle(Vec2::ZERO, 0.0, [1.0; 4]);
        canvas.glow(Vec2::ZERO, -1.0, [1.0; 4], [0.0; 4]);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_right_aligned_text_ends_at_anchor() {
        let mut canvas = Canvas::new();
        canvas.text("Score: 100", Vec2::new(780.0, 50.0), 2.0, [1.0; 4], Align::Right);
        let max_x = canvas
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert!((max_x - 780.0).abs() < 1e-3);
    }
}
