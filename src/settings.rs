//! Player preferences
//!
//! Read once at startup from `assets/settings.json` if it exists. Every
//! field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::ASSET_DIR;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Whether to draw background stars
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects start enabled
    pub sound_effects: bool,
    /// Music starts enabled
    pub music: bool,

    // === Visual Effects ===
    /// Particle effects (jump dust, explosions, distortion)
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no flicker or pulsing)
    pub reduced_motion: bool,

    // === HUD ===
    /// Periodically show the controls hint
    pub show_controls_hint: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            sound_effects: true,
            music: true,

            particles: true,

            reduced_motion: false,

            show_controls_hint: true,
        }
    }
}

impl Settings {
    /// Settings file name inside the asset directory
    const FILE_NAME: &'static str = "settings.json";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Pulsing/flickering effects allowed (respects reduced_motion)
    pub fn effective_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// Final gain for sound effects
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Final gain for music
    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Parse a settings document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `assets/settings.json`
    pub fn load() -> Self {
        Self::load_from(Path::new(ASSET_DIR).join(Self::FILE_NAME))
    }

    /// Load from `path`. A missing file silently yields the defaults; an
    /// unreadable or malformed one is logged and also yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "Low", "music": false }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.music);
        assert!(settings.sound_effects);
        assert_eq!(settings.max_particles(), 100);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Settings::from_json("{ quality: ").is_err());
        assert!(Settings::from_json(r#"{ "quality": "Ultra" }"#).is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load_from("definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let settings = Settings {
            particles: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_gains_are_clamped() {
        let settings = Settings {
            master_volume: 2.0,
            sfx_volume: 1.0,
            music_volume: 0.25,
            ..Default::default()
        };
        assert_eq!(settings.sfx_gain(), 1.0);
        assert_eq!(settings.music_gain(), 0.5);
        assert!(!QualityPreset::Low.starfield_enabled());
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
