//! Platform layer: window, GPU surface, event loop and frame pacing
//!
//! Everything here touches the operating system. The games themselves only
//! see [`AppContext`] and a [`KeyState`](crate::input::KeyState) per tick.

pub mod clock;
mod native;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::Settings;
use crate::app::{AppContext, Game};
use crate::audio::AudioManager;

pub use clock::FrameLimiter;

/// Start-up failures of the window or GPU
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Load settings and sounds, open the window and run `G` until quit
pub fn run<G: Game>() -> anyhow::Result<()> {
    let settings = Settings::load();
    log::info!(
        "Quality {}, particles {}, reduced motion {}",
        settings.quality.as_str(),
        settings.max_particles(),
        settings.reduced_motion
    );

    let seed = clock_seed();
    let audio = AudioManager::new(&settings, &G::SOUNDS);
    let mut ctx = AppContext::new(settings, audio, seed);
    let game = G::new(&mut ctx, seed)?;

    native::run(ctx, game)?;
    log::info!("{} exiting", G::TITLE);
    Ok(())
}

/// Seed from the wall clock; every run plays differently
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
