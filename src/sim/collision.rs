//! Collision tests for axis-aligned boxes and circles
//!
//! Both games only need overlap queries: runners against obstacle hit boxes,
//! the light orb against shadows, and shadows against the screen bounds.

use glam::Vec2;

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// Do two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// Result of keeping a circle inside a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallHit {
    /// Hit the left or right wall
    pub vertical: bool,
    /// Hit the top or bottom wall
    pub horizontal: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Clamp a circle inside `bounds`, reporting which walls it touched
pub fn confine_circle(center: &mut Vec2, radius: f32, bounds: &Rect) -> WallHit {
    let mut hit = WallHit::default();

    if center.x - radius < bounds.left() {
        center.x = bounds.left() + radius;
        hit.vertical = true;
    } else if center.x + radius > bounds.right() {
        center.x = bounds.right() - radius;
        hit.vertical = true;
    }

    if center.y - radius < bounds.top() {
        center.y = bounds.top() + radius;
        hit.horizontal = true;
    } else if center.y + radius > bounds.bottom() {
        center.y = bounds.bottom() - radius;
        hit.horizontal = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Rect::new(100.0, 200.0, 20.0, 40.0);
        let b = Rect::new(110.0, 230.0, 50.0, 30.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_separate_boxes_do_not_collide() {
        let a = Rect::new(100.0, 200.0, 20.0, 40.0);
        let b = Rect::new(130.0, 200.0, 20.0, 40.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_circles() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(20.0, 0.0), 15.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(25.0, 0.0), 15.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(30.0, 0.0), 15.0));
    }

    #[test]
    fn test_confine_circle() {
        let bounds = Rect::new(0.0, 0.0, 800.0, 600.0);

        let mut p = Vec2::new(5.0, 300.0);
        let hit = confine_circle(&mut p, 15.0, &bounds);
        assert!(hit.vertical && !hit.horizontal);
        assert_eq!(p.x, 15.0);

        let mut p = Vec2::new(400.0, 599.0);
        let hit = confine_circle(&mut p, 15.0, &bounds);
        assert!(hit.horizontal && !hit.vertical);
        assert_eq!(p.y, 585.0);

        let mut p = Vec2::new(400.0, 300.0);
        assert!(!confine_circle(&mut p, 15.0, &bounds).any());
    }
}
