// Emulator module - Main loop coordinator
//
// Brings up the display surface and machine context, then runs fixed-rate
// ticks until the run state reaches Terminated. Each tick:
// 1. drain input and apply transitions
// 2. stop if terminated
// 3. run one executor cycle (skipped while paused)
// 4. wait out the pacing delay
// 5. present the frame

mod pacing;

pub use pacing::Pacer;

use crate::config::Config;
use crate::display::DisplaySurface;
use crate::error::StartupError;
use crate::input::InputPoller;
use crate::machine::{CycleExecutor, Machine, RunState};
use crate::platform::Backend;
use std::time::Instant;

/// Counters collected while the loop runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Completed ticks
    pub ticks: u64,
    /// Executor cycles run
    pub cycles: u64,
    /// Frames presented
    pub frames: u64,
}

/// Main emulator structure
///
/// Owns everything the loop touches. Dropping it (or finishing `run`)
/// releases the renderer, window and windowing subsystem in that order.
pub struct Emulator<B: Backend, E: CycleExecutor> {
    surface: DisplaySurface<B>,
    machine: Machine<E>,
    poller: InputPoller,
    pacer: Pacer,
    stats: LoopStats,
}

impl<B: Backend, E: CycleExecutor> Emulator<B, E> {
    /// Bring the emulator up on `backend`
    ///
    /// Creates the display surface, initializes the machine context and
    /// clears the screen to the background color. A machine failure tears
    /// the surface down again before returning.
    pub fn start(backend: B, config: &Config, executor: E) -> Result<Self, StartupError> {
        let mut surface = DisplaySurface::initialize(backend, config)?;
        let machine = Machine::new(executor)?;

        surface.clear(config);

        log::info!(
            "Starting emulator: {} Hz, {} pacing",
            config.tick_rate,
            config.pacing
        );
        if let Some(key) = config.pause_key {
            log::info!("Pause key: {}", key);
        }

        Ok(Self {
            surface,
            machine,
            poller: InputPoller::new(config.key_bindings()),
            pacer: Pacer::new(config),
            stats: LoopStats::default(),
        })
    }

    /// Run one tick and return the run state afterwards
    pub fn tick(&mut self) -> RunState {
        self.pacer.begin_tick(Instant::now());

        self.poller
            .poll_and_apply(&mut self.surface, self.machine.state_machine_mut());
        if self.machine.state().is_terminated() {
            return RunState::Terminated;
        }

        if self.machine.step() {
            self.stats.cycles += 1;
        }

        let delay = self.pacer.delay(Instant::now());
        self.surface.delay(delay);
        self.surface.present();

        self.stats.ticks += 1;
        self.stats.frames += 1;
        log::trace!("Tick {} done ({:?} delay)", self.stats.ticks, delay);

        self.machine.state()
    }

    /// Tick until terminated, then shut the display down
    pub fn run(mut self) -> LoopStats {
        while !self.machine.state().is_terminated() {
            self.tick();
        }

        let stats = self.stats;
        self.surface.shutdown();

        log::info!(
            "Emulator stopped after {} ticks ({} cycles, {} frames)",
            stats.ticks,
            stats.cycles,
            stats.frames
        );
        stats
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.machine.state()
    }

    pub fn machine(&self) -> &Machine<E> {
        &self.machine
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::machine::IdleExecutor;
    use crate::platform::{Call, CallLog, HeadlessBackend, HostEvent};
    use std::time::Duration;

    fn start(log: &CallLog, config: &Config) -> Emulator<HeadlessBackend, IdleExecutor> {
        start_with_events(log, config, &[])
    }

    /// Start with `events` already queued; startup itself never drains input
    fn start_with_events(
        log: &CallLog,
        config: &Config,
        events: &[HostEvent],
    ) -> Emulator<HeadlessBackend, IdleExecutor> {
        let mut backend = HeadlessBackend::new(log.clone());
        for event in events {
            backend.push_event(*event);
        }
        Emulator::start(backend, config, IdleExecutor).expect("headless startup")
    }

    #[test]
    fn test_start_clears_to_background() {
        let log = CallLog::new();
        let emulator = start(&log, &Config::default());

        assert_eq!(emulator.state(), RunState::Running);
        assert_eq!(log.count(|c| matches!(c, Call::Clear(_))), 1);
        assert_eq!(log.count(|c| *c == Call::Present), 0);
    }

    #[test]
    fn test_tick_order_is_pace_then_present() {
        let log = CallLog::new();
        let mut emulator = start(&log, &Config::default());

        assert_eq!(emulator.tick(), RunState::Running);

        let calls = log.calls();
        let tail = &calls[calls.len() - 2..];
        assert_eq!(
            tail,
            &[Call::Delay(Duration::from_millis(16)), Call::Present]
        );
        assert_eq!(
            emulator.stats(),
            LoopStats {
                ticks: 1,
                cycles: 1,
                frames: 1
            }
        );
    }

    #[test]
    fn test_quit_tick_does_no_further_work() {
        let log = CallLog::new();
        let mut emulator = start_with_events(&log, &Config::default(), &[HostEvent::Quit]);

        assert_eq!(emulator.tick(), RunState::Terminated);

        assert_eq!(log.count(|c| matches!(c, Call::Delay(_))), 0);
        assert_eq!(log.count(|c| *c == Call::Present), 0);
        assert_eq!(emulator.stats(), LoopStats::default());
    }

    #[test]
    fn test_paused_ticks_skip_cycles_but_present() {
        let log = CallLog::new();
        let config = Config::default().with_pause_key(Some(Key::Char('P')));
        let pause = HostEvent::KeyDown {
            key: Key::Char('P'),
            repeat: false,
        };
        let mut emulator = start_with_events(&log, &config, &[pause]);

        assert_eq!(emulator.tick(), RunState::Paused);
        assert_eq!(emulator.tick(), RunState::Paused);

        assert_eq!(emulator.stats().cycles, 0);
        assert_eq!(emulator.stats().frames, 2);
        assert_eq!(emulator.machine().cycles(), 0);
    }

    #[test]
    fn test_run_stops_on_escape() {
        let log = CallLog::new();
        let mut backend = HeadlessBackend::new(log.clone());
        backend.push_event_after(
            3,
            HostEvent::KeyDown {
                key: Key::Escape,
                repeat: false,
            },
        );

        let emulator = Emulator::start(backend, &Config::default(), IdleExecutor).unwrap();
        let stats = emulator.run();

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.frames, 3);
        assert_eq!(
            log.teardown(),
            vec![Call::DestroyRenderer, Call::DestroyWindow, Call::QuitSubsystem]
        );
    }
}
