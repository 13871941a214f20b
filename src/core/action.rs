//! # Actions
//!
//! Everything that can happen in meteo becomes an `Action`.
//! User presses Enter? That's `Action::KeyPressed(Key::Enter)`.
//! The probe comes back? That's `Action::ProbeSucceeded { status }` or
//! `Action::ProbeFailed(error)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the runtime to carry out.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable without a terminal or a network:
//! feed actions in, assert on the state and the returned effect.

use log::{debug, info};

use crate::core::state::App;
use crate::probe::ProbeError;

/// A key press, already translated out of the terminal library's event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Confirm (Enter)
    Enter,
    /// Cancel (Esc)
    Esc,
    /// Interrupt (Ctrl+C)
    Interrupt,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Ctrl+W
    DeleteWordBackward,
    /// Ctrl+U
    DeleteToStart,
    /// Ctrl+K
    DeleteToEnd,
}

/// The closed set of messages the state machine accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    KeyPressed(Key),
    /// The probe got a response. Any status code counts, 4xx/5xx included.
    ProbeSucceeded { status: u16 },
    /// The probe failed at the transport level.
    ProbeFailed(ProbeError),
}

/// Follow-up work the runtime performs after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fire one probe against the configured endpoint.
    StartProbe,
    /// Stop processing messages and exit.
    Quit,
}

/// Apply an action to the app and return the effect the runtime should execute.
pub fn update(app: &mut App, action: Action) -> Effect {
    if app.should_quit {
        debug!("Ignoring {:?} after quit", action);
        return Effect::None;
    }

    match action {
        Action::KeyPressed(Key::Enter) => {
            info!("Probe requested (input: {:?})", app.input.value());
            Effect::StartProbe
        }
        Action::KeyPressed(Key::Esc | Key::Interrupt) => {
            info!("Quit requested");
            app.should_quit = true;
            Effect::Quit
        }
        Action::KeyPressed(key) => {
            if app.input.update(&key) {
                debug!("Input now {:?}", app.input.value());
            }
            Effect::None
        }
        Action::ProbeSucceeded { status } => {
            info!("Probe succeeded with status {}", status);
            app.last_result = Some(status);
            app.last_error = None;
            Effect::None
        }
        Action::ProbeFailed(error) => {
            info!("Probe failed: {}", error);
            app.last_error = Some(error);
            app.last_result = None;
            Effect::None
        }
    }
}
