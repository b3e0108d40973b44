// Headless backend - Scripted stand-in for a real window
//
// Records every call it receives in a shared log, hands out window and
// renderer handles that log their own destruction, and can be told to fail
// at a given startup step. Delays are recorded, never slept.

use super::{Backend, EventSource, HostEvent, WindowSpec};
use crate::display::Rgba;
use crate::error::StartupError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// One observable backend interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateWindow { width: u32, height: u32 },
    CreateRenderer { width: u32, height: u32 },
    Clear(Rgba),
    Present,
    Delay(Duration),
    DestroyRenderer,
    DestroyWindow,
    QuitSubsystem,
}

/// Shared, cloneable record of backend calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Teardown calls in the order they happened
    pub fn teardown(&self) -> Vec<Call> {
        self.0
            .borrow()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::DestroyRenderer | Call::DestroyWindow | Call::QuitSubsystem
                )
            })
            .cloned()
            .collect()
    }
}

/// Startup step at which the headless backend reports failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Window,
    Renderer,
}

/// Window handle of the headless backend
#[derive(Debug)]
pub struct HeadlessWindow {
    log: CallLog,
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.log.push(Call::DestroyWindow);
    }
}

/// Renderer handle of the headless backend
#[derive(Debug)]
pub struct HeadlessRenderer {
    log: CallLog,
    /// Last color the surface was cleared to
    pub fill: Option<Rgba>,
}

impl Drop for HeadlessRenderer {
    fn drop(&mut self) {
        self.log.push(Call::DestroyRenderer);
    }
}

/// Backend that never touches the host windowing system
#[derive(Debug)]
pub struct HeadlessBackend {
    log: CallLog,
    pending: VecDeque<HostEvent>,
    /// Events that become visible once the given number of frames was presented
    scheduled: Vec<(u64, HostEvent)>,
    presented: u64,
    fail_at: Option<FailurePoint>,
    fail_present: bool,
}

impl HeadlessBackend {
    /// Create a headless backend writing into `log`
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            pending: VecDeque::new(),
            scheduled: Vec::new(),
            presented: 0,
            fail_at: None,
            fail_present: false,
        }
    }

    /// Fail window or renderer creation
    pub fn with_failure(mut self, point: FailurePoint) -> Self {
        self.fail_at = Some(point);
        self
    }

    /// Make every present report an error
    pub fn with_failing_present(mut self) -> Self {
        self.fail_present = true;
        self
    }

    /// Queue an event that is pending right away
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    /// Queue an event that arrives after `frames` presents
    pub fn push_event_after(&mut self, frames: u64, event: HostEvent) {
        self.scheduled.push((frames, event));
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn release_due_events(&mut self) {
        let presented = self.presented;
        let mut still_waiting = Vec::with_capacity(self.scheduled.len());
        for (due, event) in self.scheduled.drain(..) {
            if due <= presented {
                self.pending.push_back(event);
            } else {
                still_waiting.push((due, event));
            }
        }
        self.scheduled = still_waiting;
    }
}

impl EventSource for HeadlessBackend {
    fn poll_event(&mut self) -> Option<HostEvent> {
        self.release_due_events();
        self.pending.pop_front()
    }
}

impl Backend for HeadlessBackend {
    type Window = HeadlessWindow;
    type Renderer = HeadlessRenderer;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window, StartupError> {
        if self.fail_at == Some(FailurePoint::Window) {
            return Err(StartupError::WindowCreate("injected failure".to_string()));
        }
        self.log.push(Call::CreateWindow {
            width: spec.width,
            height: spec.height,
        });
        Ok(HeadlessWindow {
            log: self.log.clone(),
        })
    }

    fn create_renderer(
        &mut self,
        _window: &Self::Window,
        spec: &WindowSpec,
    ) -> Result<Self::Renderer, StartupError> {
        if self.fail_at == Some(FailurePoint::Renderer) {
            return Err(StartupError::RendererCreate("injected failure".to_string()));
        }
        self.log.push(Call::CreateRenderer {
            width: spec.logical_width,
            height: spec.logical_height,
        });
        Ok(HeadlessRenderer {
            log: self.log.clone(),
            fill: None,
        })
    }

    fn clear(&mut self, renderer: &mut Self::Renderer, color: Rgba) {
        renderer.fill = Some(color);
        self.log.push(Call::Clear(color));
    }

    fn present(&mut self, _renderer: &mut Self::Renderer) -> Result<(), String> {
        self.log.push(Call::Present);
        self.presented += 1;
        if self.fail_present {
            return Err("surface lost".to_string());
        }
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.log.push(Call::Delay(duration));
    }
}

impl Drop for HeadlessBackend {
    fn drop(&mut self) {
        self.log.push(Call::QuitSubsystem);
    }
}
