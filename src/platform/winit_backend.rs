// Winit backend - Real window and renderer
//
// The winit event loop is the windowing subsystem. Instead of handing
// control to `run_app`, the loop is pumped with a zero timeout whenever the
// shell drains input, so the main loop keeps ownership of the thread.
// Rendering goes through a pixels surface (wgpu, hardware accelerated).

use super::{Backend, EventSource, HostEvent, WindowSpec};
use crate::display::Rgba;
use crate::error::StartupError;
use crate::input::Key;
use pixels::{Pixels, SurfaceTexture};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Collects window events into a queue while the event loop is pumped
#[derive(Default)]
struct EventCollector {
    pending: VecDeque<HostEvent>,
}

impl ApplicationHandler for EventCollector {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.pending.push_back(HostEvent::Quit);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let key = key_from_physical(physical_key);
                let event = match state {
                    ElementState::Pressed => HostEvent::KeyDown { key, repeat },
                    ElementState::Released => HostEvent::KeyUp { key },
                };
                self.pending.push_back(event);
            }
            _ => {}
        }
    }
}

/// Backend driving a winit window with a pixels renderer
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    collector: EventCollector,
}

impl WinitBackend {
    /// Start the windowing subsystem
    pub fn init() -> Result<Self, StartupError> {
        let event_loop =
            EventLoop::new().map_err(|e| StartupError::SubsystemInit(e.to_string()))?;

        Ok(Self {
            event_loop,
            collector: EventCollector::default(),
        })
    }

    /// Dispatch whatever the host has queued, without waiting
    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.collector);

        if let PumpStatus::Exit(code) = status {
            log::debug!("Event loop exited with code {}", code);
            self.collector.pending.push_back(HostEvent::Quit);
        }
    }
}

impl EventSource for WinitBackend {
    fn poll_event(&mut self) -> Option<HostEvent> {
        if self.collector.pending.is_empty() {
            self.pump();
        }
        self.collector.pending.pop_front()
    }
}

impl Backend for WinitBackend {
    type Window = Arc<Window>;
    type Renderer = Pixels<'static>;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window, StartupError> {
        // Created hidden so it can be positioned before the first paint
        let window_attributes = Window::default_attributes()
            .with_title(spec.title.clone())
            .with_inner_size(LogicalSize::new(spec.width, spec.height))
            .with_resizable(false)
            .with_visible(false);

        #[allow(deprecated)]
        let window = self
            .event_loop
            .create_window(window_attributes)
            .map_err(|e| StartupError::WindowCreate(e.to_string()))?;

        if spec.centered {
            center_on_primary_monitor(&window);
        }
        window.set_visible(true);

        Ok(Arc::new(window))
    }

    fn create_renderer(
        &mut self,
        window: &Self::Window,
        spec: &WindowSpec,
    ) -> Result<Self::Renderer, StartupError> {
        let window_size = window.inner_size();

        // Arc<Window> gives the surface a 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        Pixels::new(spec.logical_width, spec.logical_height, surface_texture)
            .map_err(|e| StartupError::RendererCreate(e.to_string()))
    }

    fn clear(&mut self, renderer: &mut Self::Renderer, color: Rgba) {
        let bytes = color.to_bytes();
        for pixel in renderer.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }

        // Area outside the scaled buffer
        renderer.clear_color(pixels::wgpu::Color {
            r: f64::from(color.r) / 255.0,
            g: f64::from(color.g) / 255.0,
            b: f64::from(color.b) / 255.0,
            a: f64::from(color.a) / 255.0,
        });
    }

    fn present(&mut self, renderer: &mut Self::Renderer) -> Result<(), String> {
        renderer.render().map_err(|e| e.to_string())
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

fn center_on_primary_monitor(window: &Window) {
    let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) else {
        log::debug!("No monitor information available, leaving window position to the host");
        return;
    };

    let screen = monitor.size();
    let origin = monitor.position();
    let outer = window.outer_size();

    let x = origin.x + (screen.width as i32 - outer.width as i32) / 2;
    let y = origin.y + (screen.height as i32 - outer.height as i32) / 2;
    window.set_outer_position(PhysicalPosition::new(x, y));
}

fn key_from_physical(physical_key: PhysicalKey) -> Key {
    match physical_key {
        PhysicalKey::Code(code) => key_from_code(code),
        PhysicalKey::Unidentified(_) => Key::Other,
    }
}

fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::KeyA => Key::Char('A'),
        KeyCode::KeyB => Key::Char('B'),
        KeyCode::KeyC => Key::Char('C'),
        KeyCode::KeyD => Key::Char('D'),
        KeyCode::KeyE => Key::Char('E'),
        KeyCode::KeyF => Key::Char('F'),
        KeyCode::KeyG => Key::Char('G'),
        KeyCode::KeyH => Key::Char('H'),
        KeyCode::KeyI => Key::Char('I'),
        KeyCode::KeyJ => Key::Char('J'),
        KeyCode::KeyK => Key::Char('K'),
        KeyCode::KeyL => Key::Char('L'),
        KeyCode::KeyM => Key::Char('M'),
        KeyCode::KeyN => Key::Char('N'),
        KeyCode::KeyO => Key::Char('O'),
        KeyCode::KeyP => Key::Char('P'),
        KeyCode::KeyQ => Key::Char('Q'),
        KeyCode::KeyR => Key::Char('R'),
        KeyCode::KeyS => Key::Char('S'),
        KeyCode::KeyT => Key::Char('T'),
        KeyCode::KeyU => Key::Char('U'),
        KeyCode::KeyV => Key::Char('V'),
        KeyCode::KeyW => Key::Char('W'),
        KeyCode::KeyX => Key::Char('X'),
        KeyCode::KeyY => Key::Char('Y'),
        KeyCode::KeyZ => Key::Char('Z'),
        KeyCode::Digit0 => Key::Char('0'),
        KeyCode::Digit1 => Key::Char('1'),
        KeyCode::Digit2 => Key::Char('2'),
        KeyCode::Digit3 => Key::Char('3'),
        KeyCode::Digit4 => Key::Char('4'),
        KeyCode::Digit5 => Key::Char('5'),
        KeyCode::Digit6 => Key::Char('6'),
        KeyCode::Digit7 => Key::Char('7'),
        KeyCode::Digit8 => Key::Char('8'),
        KeyCode::Digit9 => Key::Char('9'),
        _ => Key::Other,
    }
}
