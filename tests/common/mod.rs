// Common test utilities for the lifecycle tests

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use yac8::CycleExecutor;

/// Executor counting its steps in a shared cell
#[derive(Debug, Default)]
pub struct StepCounter {
    pub steps: Rc<Cell<u64>>,
}

impl CycleExecutor for StepCounter {
    fn step(&mut self) {
        self.steps.set(self.steps.get() + 1);
    }
}

/// Executor plus a handle to read its step count after the run
pub fn counting_executor() -> (StepCounter, Rc<Cell<u64>>) {
    let executor = StepCounter::default();
    let steps = executor.steps.clone();
    (executor, steps)
}

/// Executor whose reset always fails
pub struct BrokenExecutor;

impl CycleExecutor for BrokenExecutor {
    fn reset(&mut self) -> Result<(), String> {
        Err("machine memory unavailable".to_string())
    }

    fn step(&mut self) {}
}
