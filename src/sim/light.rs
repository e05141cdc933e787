//! The Shadow Tag light resource and the values derived from it
//!
//! Every derived quantity (percentage, colour, warning threshold) is computed
//! here, once, so the simulation, HUD and renderer agree on it.

use super::Rgb;
use crate::ticks_to_millis;

/// Full-strength light colour
pub const LIGHT_YELLOW: Rgb = [255, 255, 200];

/// A decaying light radius bounded by `[floor, initial]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    radius: f32,
    initial: f32,
    floor: f32,
}

impl Light {
    pub fn new(initial: f32, floor: f32) -> Self {
        let floor = floor.min(initial);
        Self {
            radius: initial,
            initial,
            floor,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Shrink by `amount`, never past the floor
    pub fn decay(&mut self, amount: f32) {
        self.radius = (self.radius - amount.max(0.0)).max(self.floor);
    }

    /// Has the light run out
    pub fn exhausted(&self) -> bool {
        self.radius <= self.floor
    }

    /// Remaining light as a fraction in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        light_fraction(self.radius, self.initial, self.floor)
    }

    /// Remaining light as a percentage in `[0, 100]`
    pub fn percent(&self) -> f32 {
        self.fraction() * 100.0
    }
}

/// Remaining light between `floor` (0) and `initial` (1)
pub fn light_fraction(radius: f32, initial: f32, floor: f32) -> f32 {
    let span = initial - floor;
    if span <= f32::EPSILON {
        return 0.0;
    }
    ((radius - floor) / span).clamp(0.0, 1.0)
}

/// Is the light low enough to warn the player
pub fn light_warning(percent: f32, threshold: f32) -> bool {
    percent < threshold
}

/// Orb/meter colour for the remaining light.
///
/// Yellow above 60%, fading to orange by 30%, then to red; below 15% it
/// pulses during the first half of every second (unless `pulse` is off).
pub fn light_color(percent: f32, tick: u64, pulse: bool) -> Rgb {
    let percent = percent.clamp(0.0, 100.0);
    if percent > 60.0 {
        return LIGHT_YELLOW;
    }
    if percent > 30.0 {
        let orange = (60.0 - percent) / 30.0;
        return [
            255,
            255 - (90.0 * orange) as u8,
            200 - (150.0 * orange) as u8,
        ];
    }

    let red = (30.0 - percent) / 30.0;
    let base: Rgb = [255, 165 - (165.0 * red) as u8, 50 - (50.0 * red) as u8];

    let millis = ticks_to_millis(tick);
    if pulse && percent < 15.0 && millis % 1000 < 500 {
        let factor = 0.7 + 0.3 * (millis as f32 * 0.01).sin();
        return base.map(|c| (c as f32 * factor).clamp(0.0, 255.0) as u8);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_floors() {
        let mut light = Light::new(150.0, 30.0);
        for _ in 0..10_000 {
            light.decay(0.05);
        }
        assert_eq!(light.radius(), 30.0);
        assert!(light.exhausted());
        assert_eq!(light.percent(), 0.0);
    }

    #[test]
    fn test_fraction_bounds() {
        assert_eq!(light_fraction(150.0, 150.0, 30.0), 1.0);
        assert_eq!(light_fraction(90.0, 150.0, 30.0), 0.5);
        assert_eq!(light_fraction(10.0, 150.0, 30.0), 0.0);
        assert_eq!(light_fraction(500.0, 150.0, 30.0), 1.0);
        assert_eq!(light_fraction(30.0, 30.0, 30.0), 0.0);
    }

    #[test]
    fn test_negative_decay_does_not_grow() {
        let mut light = Light::new(150.0, 30.0);
        light.decay(-5.0);
        assert_eq!(light.radius(), 150.0);
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(light_color(100.0, 0, true), LIGHT_YELLOW);
        // Fully orange at the 30% boundary
        assert_eq!(light_color(30.0, 0, true), [255, 165, 50]);
        // Fully red at empty (tick chosen in the non-pulsing half-second)
        assert_eq!(light_color(0.0, 45, true), [255, 0, 0]);
    }

    #[test]
    fn test_pulse_only_when_critical() {
        // 10% light, tick 6 = 100ms into the second: pulsing window
        let steady = light_color(10.0, 6, false);
        let pulsed = light_color(10.0, 6, true);
        assert_ne!(steady, pulsed);
        // 20% light never pulses
        assert_eq!(light_color(20.0, 6, true), light_color(20.0, 6, false));
    }

    #[test]
    fn test_warning_threshold() {
        assert!(light_warning(24.9, 25.0));
        assert!(!light_warning(25.0, 25.0));
    }
}
