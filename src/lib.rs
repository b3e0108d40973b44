// YAC8 Emulator Library
// Windowing shell, run state machine and main loop for a CHIP-8 emulator

// Public modules
pub mod config;
pub mod display;
pub mod emulator;
pub mod error;
pub mod input;
pub mod machine;
pub mod platform;

// Re-export main types for convenience
pub use config::{Config, Pacing};
pub use display::{DisplaySurface, Rgba};
pub use emulator::{Emulator, LoopStats};
pub use error::StartupError;
pub use input::{InputPoller, Key, KeyBindings};
pub use machine::{CycleExecutor, IdleExecutor, Machine, RunState, Transition};
pub use platform::{Backend, EventSource, HeadlessBackend, HostEvent, WinitBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Everything the binary needs can be built without a window
        let config = Config::from_args(["yac8"]);
        let _poller = InputPoller::new(config.key_bindings());
        let machine = Machine::new(IdleExecutor).unwrap();
        assert_eq!(machine.state(), RunState::Running);
    }
}
