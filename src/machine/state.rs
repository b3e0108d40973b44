// Run state machine
//
// Three states, one of them terminal. All changes go through `apply`, so
// leaving Terminated is rejected instead of silently happening.

use std::fmt;

/// Top-level emulator run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Cycle execution and rendering proceed
    #[default]
    Running,
    /// Cycle execution is skipped; input and rendering continue
    Paused,
    /// Terminal: the main loop exits
    Terminated,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }

    pub fn is_terminated(self) -> bool {
        self == RunState::Terminated
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
            RunState::Terminated => write!(f, "terminated"),
        }
    }
}

/// A requested change of run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Quit signal or escape key
    Terminate,
    Pause,
    Resume,
    TogglePause,
}

/// Rejected transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: RunState,
    pub transition: Transition,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot apply {:?} while {}",
            self.transition, self.from
        )
    }
}

impl std::error::Error for TransitionError {}

impl RunState {
    /// Compute the state reached by applying `transition`
    ///
    /// Re-applying a transition whose target is the current state is a
    /// no-op. Terminated only accepts `Terminate`, which leaves it as is.
    pub fn next(self, transition: Transition) -> Result<RunState, TransitionError> {
        use RunState::*;
        use Transition::*;

        match (self, transition) {
            (_, Terminate) => Ok(Terminated),
            (Terminated, _) => Err(TransitionError {
                from: self,
                transition,
            }),
            (Running | Paused, Pause) => Ok(Paused),
            (Running | Paused, Resume) => Ok(Running),
            (Running, TogglePause) => Ok(Paused),
            (Paused, TogglePause) => Ok(Running),
        }
    }
}

/// Holder of the current run state
///
/// The state can be read freely but only changed through `apply`.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    current: RunState,
}

impl StateMachine {
    /// Start in `Running`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> RunState {
        self.current
    }

    /// Enter `Terminated`, accepted from every state
    pub fn terminate(&mut self) {
        if !self.current.is_terminated() {
            log::debug!("Run state {} -> {}", self.current, RunState::Terminated);
        }
        self.current = RunState::Terminated;
    }

    /// Apply a transition, returning the new state
    pub fn apply(&mut self, transition: Transition) -> Result<RunState, TransitionError> {
        let next = self.current.next(transition)?;
        if next != self.current {
            log::debug!("Run state {} -> {}", self.current, next);
        }
        self.current = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_running() {
        assert_eq!(StateMachine::new().current(), RunState::Running);
        assert_eq!(RunState::default(), RunState::Running);
    }

    #[test]
    fn test_terminate_from_any_live_state() {
        assert_eq!(
            RunState::Running.next(Transition::Terminate),
            Ok(RunState::Terminated)
        );
        assert_eq!(
            RunState::Paused.next(Transition::Terminate),
            Ok(RunState::Terminated)
        );
    }

    #[test]
    fn test_terminated_is_absorbing() {
        for transition in [Transition::Pause, Transition::Resume, Transition::TogglePause] {
            let err = RunState::Terminated.next(transition).unwrap_err();
            assert_eq!(err.from, RunState::Terminated);
            assert_eq!(err.transition, transition);
        }
        assert_eq!(
            RunState::Terminated.next(Transition::Terminate),
            Ok(RunState::Terminated)
        );
    }

    #[test]
    fn test_pause_and_resume() {
        let mut machine = StateMachine::new();

        assert_eq!(machine.apply(Transition::Pause), Ok(RunState::Paused));
        assert_eq!(machine.apply(Transition::Pause), Ok(RunState::Paused));
        assert_eq!(machine.apply(Transition::Resume), Ok(RunState::Running));
        assert_eq!(machine.apply(Transition::Resume), Ok(RunState::Running));
    }

    #[test]
    fn test_toggle_pause_cycles() {
        let mut machine = StateMachine::new();

        for i in 0..6 {
            machine.apply(Transition::TogglePause).unwrap();
            assert_eq!(machine.current().is_paused(), i % 2 == 0);
        }
    }

    #[test]
    fn test_rejected_transition_keeps_state() {
        let mut machine = StateMachine::new();
        machine.apply(Transition::Terminate).unwrap();

        assert!(machine.apply(Transition::Resume).is_err());
        assert!(machine.apply(Transition::TogglePause).is_err());
        assert!(machine.current().is_terminated());
    }

    #[test]
    fn test_terminate_from_every_state() {
        let mut machine = StateMachine::new();
        machine.terminate();
        assert_eq!(machine.current(), RunState::Terminated);
        machine.terminate();
        assert_eq!(machine.current(), RunState::Terminated);

        let mut machine = StateMachine::new();
        machine.apply(Transition::Pause).unwrap();
        machine.terminate();
        assert!(machine.current().is_terminated());
        assert!(machine.apply(Transition::Resume).is_err());
    }

    #[test]
    fn test_transition_error_message() {
        let err = RunState::Terminated.next(Transition::Resume).unwrap_err();
        assert_eq!(err.to_string(), "Cannot apply Resume while terminated");
    }
}
