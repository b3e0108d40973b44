// Machine module - Machine context
//
// Aggregates the run state with the cycle executor. The executor is the
// extension point where instruction emulation plugs in; the shell itself
// only ships an idle one.

mod state;

pub use state::{RunState, StateMachine, Transition, TransitionError};

use crate::error::StartupError;

/// Performs one unit of virtual-machine work per tick
pub trait CycleExecutor {
    /// Bring the machine to its power-on state before the first tick
    fn reset(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Execute one unit of work synchronously
    fn step(&mut self);
}

/// Executor that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleExecutor;

impl CycleExecutor for IdleExecutor {
    fn step(&mut self) {}
}

/// Machine context: run state plus executor
#[derive(Debug)]
pub struct Machine<E: CycleExecutor> {
    state: StateMachine,
    executor: E,
    cycles: u64,
}

impl<E: CycleExecutor> Machine<E> {
    /// Initialize the machine context
    ///
    /// Resets the executor and starts in `Running`.
    ///
    /// # Errors
    /// `StartupError::MachineInit` if the executor fails to reset
    pub fn new(mut executor: E) -> Result<Self, StartupError> {
        executor.reset().map_err(StartupError::MachineInit)?;

        Ok(Self {
            state: StateMachine::new(),
            executor,
            cycles: 0,
        })
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state.current()
    }

    /// Run state holder, for applying transitions
    pub fn state_machine_mut(&mut self) -> &mut StateMachine {
        &mut self.state
    }

    /// Execute one cycle if running
    ///
    /// Returns whether the executor was invoked.
    pub fn step(&mut self) -> bool {
        if !self.state.current().is_running() {
            return false;
        }
        self.executor.step();
        self.cycles += 1;
        true
    }

    /// Number of cycles executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}
