// Platform module - Capability surface of the host windowing system
//
// The rest of the shell talks to the host only through these traits:
// - Window and renderer creation
// - Clear / present on the renderer
// - A non-blocking drain of typed input events
// - A coarse delay primitive used for frame pacing
//
// The subsystem itself is the backend value. Its lifetime encloses the
// window and renderer handles it hands out.

pub mod headless;
pub mod winit_backend;

pub use headless::{Call, CallLog, FailurePoint, HeadlessBackend};
pub use winit_backend::WinitBackend;

use crate::display::Rgba;
use crate::error::StartupError;
use crate::input::Key;
use std::time::Duration;

/// Input event drained from the host queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The window was asked to close
    Quit,
    /// A key went down
    KeyDown { key: Key, repeat: bool },
    /// A key went up
    KeyUp { key: Key },
}

/// Parameters for window creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    /// Window width in screen pixels (already scaled)
    pub width: u32,
    /// Window height in screen pixels (already scaled)
    pub height: u32,
    /// Width of the renderer's logical buffer
    pub logical_width: u32,
    /// Height of the renderer's logical buffer
    pub logical_height: u32,
    /// Center the window on the primary display
    pub centered: bool,
}

/// Source of host input events
pub trait EventSource {
    /// Take the next pending event without blocking
    fn poll_event(&mut self) -> Option<HostEvent>;
}

/// Windowing and rendering backend
pub trait Backend: EventSource {
    /// Window handle, destroyed when dropped
    type Window;
    /// Renderer handle bound to a window, destroyed when dropped
    type Renderer;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window, StartupError>;

    fn create_renderer(
        &mut self,
        window: &Self::Window,
        spec: &WindowSpec,
    ) -> Result<Self::Renderer, StartupError>;

    /// Fill the whole rendering surface with one color
    fn clear(&mut self, renderer: &mut Self::Renderer, color: Rgba);

    /// Flip the back buffer to the screen
    fn present(&mut self, renderer: &mut Self::Renderer) -> Result<(), String>;

    /// Block the calling thread for roughly `duration`
    fn delay(&mut self, duration: Duration);
}

impl EventSource for std::collections::VecDeque<HostEvent> {
    fn poll_event(&mut self) -> Option<HostEvent> {
        self.pop_front()
    }
}
