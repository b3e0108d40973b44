// Display surface - Window and renderer lifecycle
//
// Owns the backend (windowing subsystem), the window and the renderer bound
// to it. Struct fields drop in declaration order, so an abandoned surface
// releases renderer, window and subsystem in that order without any extra
// bookkeeping. `shutdown` does the same explicitly and consumes the surface.

use crate::config::Config;
use crate::error::StartupError;
use crate::platform::{Backend, EventSource, HostEvent, WindowSpec};
use std::time::Duration;

/// Title shown in the window decoration
pub const WINDOW_TITLE: &str = "YAC8 Emulator";

/// Window plus renderer created from a finalized configuration
pub struct DisplaySurface<B: Backend> {
    renderer: B::Renderer,
    window: B::Window,
    backend: B,
}

impl<B: Backend> DisplaySurface<B> {
    /// Create the window and renderer
    ///
    /// The window is `window_width * scale_factor` by
    /// `window_height * scale_factor`, centered on the primary display. If
    /// renderer creation fails the window is released before the backend.
    ///
    /// # Errors
    /// `StartupError::WindowCreate` or `StartupError::RendererCreate`
    pub fn initialize(mut backend: B, config: &Config) -> Result<Self, StartupError> {
        let spec = window_spec(config);

        let window = backend.create_window(&spec)?;
        let renderer = backend.create_renderer(&window, &spec)?;

        log::info!(
            "Created {}x{} window ({}x{} logical, scale {}x)",
            spec.width,
            spec.height,
            spec.logical_width,
            spec.logical_height,
            config.scale_factor
        );

        Ok(Self {
            renderer,
            window,
            backend,
        })
    }

    /// Fill the whole surface with the configured background color
    pub fn clear(&mut self, config: &Config) {
        self.backend.clear(&mut self.renderer, config.bg_rgba());
    }

    /// Make the most recent clear/draw visible
    pub fn present(&mut self) {
        if let Err(err) = self.backend.present(&mut self.renderer) {
            log::warn!("Render error: {}", err);
        }
    }

    /// Sleep through the backend's delay primitive
    pub fn delay(&mut self, duration: Duration) {
        self.backend.delay(duration);
    }

    /// Release renderer, window and subsystem, in that order
    pub fn shutdown(self) {
        let DisplaySurface {
            renderer,
            window,
            backend,
        } = self;

        drop(renderer);
        drop(window);
        drop(backend);
        log::debug!("Display surface shut down");
    }
}

impl<B: Backend> EventSource for DisplaySurface<B> {
    fn poll_event(&mut self) -> Option<HostEvent> {
        self.backend.poll_event()
    }
}

/// Window parameters derived from the configuration
pub fn window_spec(config: &Config) -> WindowSpec {
    let (width, height) = config.physical_size();
    WindowSpec {
        title: WINDOW_TITLE.to_string(),
        width,
        height,
        logical_width: config.window_width,
        logical_height: config.window_height,
        centered: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Rgba;
    use crate::platform::{Call, CallLog, FailurePoint, HeadlessBackend};

    #[test]
    fn test_window_spec_uses_scaled_size() {
        let spec = window_spec(&Config::default());
        assert_eq!(spec.title, WINDOW_TITLE);
        assert_eq!((spec.width, spec.height), (1280, 640));
        assert_eq!((spec.logical_width, spec.logical_height), (64, 32));
        assert!(spec.centered);
    }

    #[test]
    fn test_initialize_creates_window_then_renderer() {
        let log = CallLog::new();
        let config = Config::default().with_scale(10);
        let surface = DisplaySurface::initialize(HeadlessBackend::new(log.clone()), &config)
            .expect("headless startup");

        assert_eq!(
            log.calls(),
            vec![
                Call::CreateWindow {
                    width: 640,
                    height: 320
                },
                Call::CreateRenderer {
                    width: 64,
                    height: 32
                },
            ]
        );
        drop(surface);
    }

    #[test]
    fn test_clear_uses_background_color() {
        let log = CallLog::new();
        let config = Config::default();
        let mut surface =
            DisplaySurface::initialize(HeadlessBackend::new(log.clone()), &config).unwrap();

        surface.clear(&config);

        assert_eq!(
            log.calls().last(),
            Some(&Call::Clear(Rgba {
                r: 255,
                g: 255,
                b: 0,
                a: 255
            }))
        );
    }

    #[test]
    fn test_shutdown_releases_in_reverse_order() {
        let log = CallLog::new();
        let surface =
            DisplaySurface::initialize(HeadlessBackend::new(log.clone()), &Config::default())
                .unwrap();

        surface.shutdown();

        assert_eq!(
            log.teardown(),
            vec![Call::DestroyRenderer, Call::DestroyWindow, Call::QuitSubsystem]
        );
    }

    #[test]
    fn test_dropped_surface_releases_in_reverse_order() {
        let log = CallLog::new();
        let surface =
            DisplaySurface::initialize(HeadlessBackend::new(log.clone()), &Config::default())
                .unwrap();

        drop(surface);

        assert_eq!(
            log.teardown(),
            vec![Call::DestroyRenderer, Call::DestroyWindow, Call::QuitSubsystem]
        );
    }

    #[test]
    fn test_renderer_failure_releases_window_then_subsystem() {
        let log = CallLog::new();
        let backend = HeadlessBackend::new(log.clone()).with_failure(FailurePoint::Renderer);

        let result = DisplaySurface::initialize(backend, &Config::default());

        assert!(matches!(result, Err(StartupError::RendererCreate(_))));
        assert_eq!(
            log.teardown(),
            vec![Call::DestroyWindow, Call::QuitSubsystem]
        );
    }

    #[test]
    fn test_window_failure_releases_subsystem_only() {
        let log = CallLog::new();
        let backend = HeadlessBackend::new(log.clone()).with_failure(FailurePoint::Window);

        let result = DisplaySurface::initialize(backend, &Config::default());

        assert!(matches!(result, Err(StartupError::WindowCreate(_))));
        assert_eq!(log.teardown(), vec![Call::QuitSubsystem]);
    }

    #[test]
    fn test_present_failure_is_not_fatal() {
        let log = CallLog::new();
        let backend = HeadlessBackend::new(log.clone()).with_failing_present();
        let mut surface = DisplaySurface::initialize(backend, &Config::default()).unwrap();

        surface.present();
        surface.present();

        assert_eq!(log.count(|c| *c == Call::Present), 2);
    }
}
