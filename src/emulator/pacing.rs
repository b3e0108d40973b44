// Frame pacing
//
// Decides how long the main loop waits at the end of each tick.

use crate::config::{Config, Pacing};
use std::time::{Duration, Instant};

/// Per-tick delay calculator
#[derive(Debug, Clone)]
pub struct Pacer {
    pacing: Pacing,
    fixed_delay: Duration,
    frame_duration: Duration,
    tick_start: Option<Instant>,
}

impl Pacer {
    pub fn new(config: &Config) -> Self {
        Self {
            pacing: config.pacing,
            fixed_delay: config.fixed_delay(),
            frame_duration: config.frame_duration(),
            tick_start: None,
        }
    }

    /// Mark the start of a tick
    pub fn begin_tick(&mut self, now: Instant) {
        self.tick_start = Some(now);
    }

    /// How long to wait at `now` before presenting
    ///
    /// Fixed-delay pacing always returns the flat delay and lets drift
    /// accumulate. Compensated pacing returns what is left of the frame
    /// period since `begin_tick`, or zero when the tick overran.
    pub fn delay(&self, now: Instant) -> Duration {
        match self.pacing {
            Pacing::FixedDelay => self.fixed_delay,
            Pacing::Compensated => match self.tick_start {
                Some(start) => (start + self.frame_duration).saturating_duration_since(now),
                None => self.frame_duration,
            },
        }
    }
}
