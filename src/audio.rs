//! Audio playback using rodio
//!
//! Every sound is optional. A file that is missing or fails to decode is
//! replaced by [`Silence`], so the games play identically without assets.

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::Settings;
use crate::consts::ASSET_DIR;

/// Errors loading a sound
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no audio output device")]
    NoOutputDevice,
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Shadow tagged
    Tag,
    /// Light below the warning threshold
    LightLow,
    /// All shadows tagged
    LevelComplete,
    /// Run lost
    GameOver,
    /// Player footstep
    Footstep,
    /// Runner jump
    Jump,
}

impl SoundEffect {
    /// Per-effect volume relative to the sfx gain
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Footstep => 0.2,
            _ => 1.0,
        }
    }
}

/// Sounds that play until stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loop {
    /// Background music
    Music,
    /// Slow-motion drone
    SlowMo,
}

impl Loop {
    /// Music follows the music gain, everything else the sfx gain
    pub fn is_music(&self) -> bool {
        matches!(self, Loop::Music)
    }
}

/// Asset file names for one game
#[derive(Debug, Clone, Copy)]
pub struct SoundBank {
    pub effects: &'static [(SoundEffect, &'static str)],
    pub loops: &'static [(Loop, &'static str)],
}

/// Something that can be played
pub trait Sound {
    /// Fire and forget at `volume`
    fn play(&self, volume: f32);
    /// Start looping at `volume`; the sink controls (and stops) the loop
    fn start_loop(&self, volume: f32) -> Option<Sink>;
}

/// A decoded clip ready to play on the output device
pub struct Clip {
    source: Buffered<Decoder<BufReader<File>>>,
    output: OutputStreamHandle,
}

impl Clip {
    /// Open and decode `path` for playback on `output`
    pub fn load(path: &Path, output: &OutputStreamHandle) -> Result<Self, LoadError> {
        Ok(Self {
            source: decode(path)?,
            output: output.clone(),
        })
    }
}

impl Sound for Clip {
    fn play(&self, volume: f32) {
        if let Ok(sink) = Sink::try_new(&self.output) {
            sink.set_volume(volume);
            sink.append(self.source.clone());
            sink.detach();
        }
    }

    fn start_loop(&self, volume: f32) -> Option<Sink> {
        let sink = Sink::try_new(&self.output).ok()?;
        sink.set_volume(volume);
        sink.append(self.source.clone().repeat_infinite());
        Some(sink)
    }
}

/// The null sound
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl Sound for Silence {
    fn play(&self, _volume: f32) {}

    fn start_loop(&self, _volume: f32) -> Option<Sink> {
        None
    }
}

/// Open and decode an audio file into a replayable buffer
fn decode(path: &Path) -> Result<Buffered<Decoder<BufReader<File>>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoder.buffered())
}

/// A loop slot: its sound plus the sink while it is running
struct LoopSlot {
    sound: Box<dyn Sound>,
    sink: Option<Sink>,
    /// Requested to run (the sink may be missing when silent)
    running: bool,
}

/// Audio manager for a game
pub struct AudioManager {
    /// Output stream (must be kept alive)
    _stream: Option<OutputStream>,
    effects: HashMap<SoundEffect, Box<dyn Sound>>,
    loops: HashMap<Loop, LoopSlot>,
    sfx_gain: f32,
    music_gain: f32,
    sfx_enabled: bool,
    music_enabled: bool,
}

impl AudioManager {
    /// Open the default output and load `bank` from the asset directory.
    /// Never fails: anything missing becomes [`Silence`].
    pub fn new(settings: &Settings, bank: &SoundBank) -> Self {
        let (stream, output) = match OutputStream::try_default() {
            Ok((stream, output)) => (Some(stream), Some(output)),
            Err(e) => {
                log::warn!("{}: {e} - audio disabled", LoadError::NoOutputDevice);
                (None, None)
            }
        };

        let mut missing = Vec::new();
        let mut load = |file: &str| -> Box<dyn Sound> {
            let path = Path::new(ASSET_DIR).join(file);
            let loaded = match &output {
                Some(output) => Clip::load(&path, output),
                None => Err(LoadError::NoOutputDevice),
            };
            match loaded {
                Ok(clip) => Box::new(clip),
                Err(e) => {
                    log::debug!("{e}");
                    missing.push(file.to_string());
                    Box::new(Silence)
                }
            }
        };

        let effects: HashMap<_, _> = bank
            .effects
            .iter()
            .map(|(effect, file)| (*effect, load(file)))
            .collect();
        let loops: HashMap<_, _> = bank
            .loops
            .iter()
            .map(|(kind, file)| {
                let slot = LoopSlot {
                    sound: load(file),
                    sink: None,
                    running: false,
                };
                (*kind, slot)
            })
            .collect();

        if output.is_some() && !missing.is_empty() {
            log::warn!(
                "Sound files not found, playing without them: {}",
                missing.join(", ")
            );
        }

        let mut manager = Self::silent(settings);
        manager._stream = stream;
        manager.effects = effects;
        manager.loops = loops;
        manager
    }

    /// A manager with no output at all
    pub fn silent(settings: &Settings) -> Self {
        Self {
            _stream: None,
            effects: HashMap::new(),
            loops: HashMap::new(),
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            sfx_enabled: settings.sound_effects,
            music_enabled: settings.music,
        }
    }

    /// Play a one-shot effect (no-op when effects are off)
    pub fn play(&self, effect: SoundEffect) {
        if !self.sfx_enabled {
            return;
        }
        if let Some(sound) = self.effects.get(&effect) {
            sound.play(self.sfx_gain * effect.base_volume());
        }
    }

    fn loop_volume(&self, kind: Loop) -> f32 {
        if kind.is_music() {
            0.5 * self.music_gain
        } else {
            self.sfx_gain
        }
    }

    fn loop_enabled(&self, kind: Loop) -> bool {
        if kind.is_music() {
            self.music_enabled
        } else {
            self.sfx_enabled
        }
    }

    /// Start a loop if it is not already running
    pub fn start_loop(&mut self, kind: Loop) {
        let volume = self.loop_volume(kind);
        let enabled = self.loop_enabled(kind);
        let Some(slot) = self.loops.get_mut(&kind) else {
            return;
        };
        if slot.running {
            return;
        }
        slot.running = true;
        slot.sink = slot.sound.start_loop(volume);
        if !enabled {
            if let Some(sink) = &slot.sink {
                sink.pause();
            }
        }
    }

    /// Stop a loop
    pub fn stop_loop(&mut self, kind: Loop) {
        if let Some(slot) = self.loops.get_mut(&kind) {
            slot.running = false;
            if let Some(sink) = slot.sink.take() {
                sink.stop();
            }
        }
    }

    pub fn is_looping(&self, kind: Loop) -> bool {
        self.loops.get(&kind).is_some_and(|slot| slot.running)
    }

    pub fn sfx_enabled(&self) -> bool {
        self.sfx_enabled
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Toggle sound effects (and the non-music loops with them)
    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx_enabled = !self.sfx_enabled;
        self.apply_enabled();
        log::info!("Sound effects {}", on_off(self.sfx_enabled));
        self.sfx_enabled
    }

    /// Pause or resume the music
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.apply_enabled();
        log::info!("Music {}", on_off(self.music_enabled));
        self.music_enabled
    }

    fn apply_enabled(&mut self) {
        let (music, sfx) = (self.music_enabled, self.sfx_enabled);
        for (kind, slot) in &self.loops {
            let enabled = if kind.is_music() { music } else { sfx };
            if let Some(sink) = &slot.sink {
                if enabled {
                    sink.play();
                } else {
                    sink.pause();
                }
            }
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_open_error() {
        let err = decode(Path::new("no/such/dir/jump.wav")).err();
        assert!(matches!(err, Some(LoadError::Open { .. })));
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("jump.wav"));
    }

    #[test]
    fn test_silence_is_inert() {
        Silence.play(1.0);
        assert!(Silence.start_loop(1.0).is_none());
    }

    #[test]
    fn test_silent_manager_tracks_loops() {
        let mut audio = AudioManager::silent(&Settings::default());
        audio.loops.insert(
            Loop::SlowMo,
            LoopSlot {
                sound: Box::new(Silence),
                sink: None,
                running: false,
            },
        );
        audio.start_loop(Loop::SlowMo);
        assert!(audio.is_looping(Loop::SlowMo));
        audio.stop_loop(Loop::SlowMo);
        assert!(!audio.is_looping(Loop::SlowMo));
        // Unknown loops are ignored
        audio.start_loop(Loop::Music);
        assert!(!audio.is_looping(Loop::Music));
        audio.play(SoundEffect::Jump);
    }

    #[test]
    fn test_toggles_follow_settings() {
        let settings = Settings {
            music: false,
            ..Default::default()
        };
        let mut audio = AudioManager::silent(&settings);
        assert!(!audio.music_enabled());
        assert!(audio.sfx_enabled());
        assert!(audio.toggle_music());
        assert!(!audio.toggle_sfx());
    }

    #[test]
    fn test_footstep_is_quiet() {
        assert_eq!(SoundEffect::Footstep.base_volume(), 0.2);
        assert_eq!(SoundEffect::Tag.base_volume(), 1.0);
    }
}
