//! Short-lived visual particles (jump dust, crash sparks, time distortion)
//!
//! Particles never affect gameplay, but they live in the simulation so they
//! obey the same time factor as everything else.

use glam::Vec2;
use rand::Rng;

use super::Rgb;

/// Longest lifetime a particle is spawned with, in ticks
pub const PARTICLE_MAX_LIFETIME: f32 = 40.0;

/// Which half of the Time Runners screen a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    Present,
    Past,
}

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub timeline: Timeline,
    pub size: f32,
    /// Remaining life in ticks
    pub lifetime: f32,
    /// Pulse phase (radians)
    pub pulse: f32,
}

impl Particle {
    /// Spawn with randomised drift, size and lifetime
    pub fn spawn(pos: Vec2, color: Rgb, timeline: Timeline, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-2.0..=0.0)),
            color,
            timeline,
            size: rng.random_range(2..=5) as f32,
            lifetime: rng.random_range(20..=40) as f32,
            pulse: rng.random::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Advance by one tick scaled by `factor`
    pub fn update(&mut self, factor: f32) {
        self.pos += self.vel * factor;
        self.lifetime -= factor;
        self.size = (self.size - 0.05 * factor).max(0.0);
        self.pulse = (self.pulse + 0.1 * factor) % std::f32::consts::TAU;
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0.0
    }

    /// Opacity in `[0, 1]`, fading with remaining life
    pub fn alpha(&self) -> f32 {
        (self.lifetime / PARTICLE_MAX_LIFETIME).clamp(0.0, 1.0)
    }

    /// Drawn radius including the pulse (0.8x to 1.2x of `size`)
    pub fn pulsed_size(&self) -> f32 {
        let pulse = (self.pulse.sin() + 1.0) / 2.0;
        self.size * (0.8 + 0.4 * pulse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(Vec2::ZERO, [255, 0, 0], Timeline::Past, &mut rng);
            assert!((2.0..=5.0).contains(&p.size));
            assert!((20.0..=40.0).contains(&p.lifetime));
            assert!(p.vel.y <= 0.0 && p.vel.x.abs() <= 1.0);
        }
    }

    #[test]
    fn test_dies_after_lifetime() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Particle::spawn(Vec2::ZERO, [0, 0, 255], Timeline::Present, &mut rng);
        let life = p.lifetime;
        for _ in 0..(life as usize) {
            p.update(1.0);
        }
        assert!(p.is_dead());
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_half_speed_halves_motion() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut a = Particle::spawn(Vec2::ZERO, [0, 0, 0], Timeline::Present, &mut rng);
        let mut b = a.clone();
        a.update(1.0);
        b.update(0.5);
        assert!((a.pos - b.pos * 2.0).length() < 1e-5);
    }
}
