//! Native window and event loop (winit)

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::PlatformError;
use super::clock::FrameLimiter;
use crate::app::{AppContext, Game};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE};
use crate::input::{Key, KeyState};
use crate::renderer::RenderState;

/// Run `game` in a window until it is closed or Escape is pressed
pub(super) fn run<G: Game>(ctx: AppContext, game: G) -> Result<(), PlatformError> {
    let event_loop = EventLoop::new()?;
    let mut app = App {
        ctx,
        game,
        keys: KeyState::new(),
        limiter: FrameLimiter::new(TICK_RATE, Instant::now()),
        window: None,
        render: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App<G> {
    ctx: AppContext,
    game: G,
    keys: KeyState,
    limiter: FrameLimiter,
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    /// Start-up failure, reported once the loop has exited
    error: Option<PlatformError>,
}

impl<G: Game> App<G> {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = Window::default_attributes()
            .with_title(G::TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let size = window.inner_size();
        let render = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let key = match event.physical_key {
            PhysicalKey::Code(code) => map_key(code),
            PhysicalKey::Unidentified(_) => Key::Other,
        };
        match event.state {
            ElementState::Pressed if key == Key::Escape => event_loop.exit(),
            ElementState::Pressed => self.keys.key_down(key, event.repeat),
            ElementState::Released => self.keys.key_up(key),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render) = self.render.as_mut() else {
            return;
        };
        let vertices = self.game.draw(&mut self.ctx);
        match render.render(&vertices, self.game.clear_color()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => render.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {e:?}"),
        }
    }
}

impl<G: Game> ApplicationHandler for App<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Start-up failed: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::Resized(size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if self.limiter.poll(Instant::now()) {
            self.game.update(&mut self.ctx, &self.keys);
            self.keys.end_frame();
            self.ctx.frame += 1;
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.limiter.deadline()));
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyS => Key::S,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::ArrowUp), Key::Up);
        assert_eq!(map_key(KeyCode::KeyS), Key::S);
        assert_eq!(map_key(KeyCode::Enter), Key::Other);
    }
}
