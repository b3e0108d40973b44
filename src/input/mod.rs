// Input module - Host input handling
//
// Drains the host event queue once per tick and turns quit requests (and
// the optional pause key) into run-state transitions.

pub mod keys;

pub use keys::Key;

use crate::machine::{StateMachine, Transition};
use crate::platform::{EventSource, HostEvent};

/// Keys with a meaning to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Key that ends the program (default: Escape)
    pub quit: Key,
    /// Key that toggles pause; unbound unless configured
    pub pause: Option<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: Key::Escape,
            pause: None,
        }
    }
}

/// Applies drained host events to the run state
#[derive(Debug, Clone, Default)]
pub struct InputPoller {
    bindings: KeyBindings,
}

impl InputPoller {
    /// Create a poller with the given bindings
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Drain pending events in arrival order and apply them
    ///
    /// The first quit request (window close or the quit key) terminates and
    /// stops the drain, leaving later events unread. Never blocks.
    pub fn poll_and_apply<S>(&self, source: &mut S, state: &mut StateMachine)
    where
        S: EventSource + ?Sized,
    {
        while let Some(event) = source.poll_event() {
            log::trace!("Input event: {:?}", event);

            match event {
                HostEvent::Quit => {
                    log::info!("Close requested, exiting...");
                    state.terminate();
                    return;
                }
                HostEvent::KeyDown { key, .. } if key == self.bindings.quit => {
                    log::info!("{} pressed, exiting...", key);
                    state.terminate();
                    return;
                }
                HostEvent::KeyDown { key, repeat } if Some(key) == self.bindings.pause => {
                    if repeat {
                        continue;
                    }
                    if let Err(err) = state.apply(Transition::TogglePause) {
                        log::debug!("Ignoring pause key: {}", err);
                    }
                }
                HostEvent::KeyDown { .. } | HostEvent::KeyUp { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::RunState;
    use std::collections::VecDeque;

    fn key_down(key: Key) -> HostEvent {
        HostEvent::KeyDown { key, repeat: false }
    }

    fn poll(poller: &InputPoller, events: &[HostEvent], state: &mut StateMachine) -> usize {
        let mut queue: VecDeque<HostEvent> = events.iter().copied().collect();
        poller.poll_and_apply(&mut queue, state);
        queue.len()
    }

    #[test]
    fn test_window_close_terminates() {
        let mut state = StateMachine::new();
        poll(&InputPoller::default(), &[HostEvent::Quit], &mut state);
        assert_eq!(state.current(), RunState::Terminated);
    }

    #[test]
    fn test_escape_terminates() {
        let mut state = StateMachine::new();
        poll(&InputPoller::default(), &[key_down(Key::Escape)], &mut state);
        assert_eq!(state.current(), RunState::Terminated);
    }

    #[test]
    fn test_escape_release_is_ignored() {
        let mut state = StateMachine::new();
        poll(
            &InputPoller::default(),
            &[HostEvent::KeyUp { key: Key::Escape }],
            &mut state,
        );
        assert_eq!(state.current(), RunState::Running);
    }

    #[test]
    fn test_unrelated_keys_leave_state_unchanged() {
        let mut state = StateMachine::new();
        let events = [
            key_down(Key::Char('A')),
            HostEvent::KeyUp { key: Key::Char('A') },
            key_down(Key::Space),
            key_down(Key::Char('P')),
            HostEvent::KeyUp { key: Key::Other },
        ];

        let left = poll(&InputPoller::default(), &events, &mut state);

        assert_eq!(state.current(), RunState::Running);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_quit_stops_the_drain() {
        let mut state = StateMachine::new();
        let events = [
            key_down(Key::Char('1')),
            HostEvent::Quit,
            key_down(Key::Char('2')),
            HostEvent::KeyUp { key: Key::Char('2') },
        ];

        let left = poll(&InputPoller::default(), &events, &mut state);

        assert_eq!(state.current(), RunState::Terminated);
        assert_eq!(left, 2);
    }

    #[test]
    fn test_terminated_stays_terminated() {
        let bindings = KeyBindings {
            pause: Some(Key::Char('P')),
            ..KeyBindings::default()
        };
        let poller = InputPoller::new(bindings);
        let mut state = StateMachine::new();
        poll(&poller, &[HostEvent::Quit], &mut state);

        poll(&poller, &[key_down(Key::Char('P'))], &mut state);
        poll(&poller, &[HostEvent::KeyUp { key: Key::Escape }], &mut state);
        poll(&poller, &[], &mut state);

        assert_eq!(state.current(), RunState::Terminated);
    }

    #[test]
    fn test_pause_key_toggles() {
        let poller = InputPoller::new(KeyBindings {
            pause: Some(Key::Space),
            ..KeyBindings::default()
        });
        let mut state = StateMachine::new();

        poll(&poller, &[key_down(Key::Space)], &mut state);
        assert_eq!(state.current(), RunState::Paused);

        poll(
            &poller,
            &[HostEvent::KeyUp { key: Key::Space }, key_down(Key::Space)],
            &mut state,
        );
        assert_eq!(state.current(), RunState::Running);
    }

    #[test]
    fn test_pause_key_repeat_is_ignored() {
        let poller = InputPoller::new(KeyBindings {
            pause: Some(Key::Space),
            ..KeyBindings::default()
        });
        let mut state = StateMachine::new();

        poll(
            &poller,
            &[
                key_down(Key::Space),
                HostEvent::KeyDown {
                    key: Key::Space,
                    repeat: true,
                },
            ],
            &mut state,
        );

        assert_eq!(state.current(), RunState::Paused);
    }

    #[test]
    fn test_escape_terminates_while_paused() {
        let poller = InputPoller::new(KeyBindings {
            pause: Some(Key::Char('P')),
            ..KeyBindings::default()
        });
        let mut state = StateMachine::new();

        poll(
            &poller,
            &[key_down(Key::Char('P')), key_down(Key::Escape)],
            &mut state,
        );

        assert_eq!(state.current(), RunState::Terminated);
    }

    #[test]
    fn test_empty_queue_returns_immediately() {
        let mut state = StateMachine::new();
        poll(&InputPoller::default(), &[], &mut state);
        assert_eq!(state.current(), RunState::Running);
    }
}
