//! # View
//!
//! Pure mapping from `App` to the text shown on screen.
//!
//! Which screen wins is a fixed order: error > result > prompt.
//!
//! 1. **Error**: the prompt screen followed by `something went wrong: <error>`.
//!    The field stays on screen so the user can edit and retry.
//! 2. **Result**: `200 OK`, replacing the prompt screen entirely.
//! 3. **Prompt**: the prompt line, the field and the help hint.

use crate::core::state::App;
use crate::probe::{ProbeError, status_text};

pub const PROMPT: &str = "Enter a location:";
pub const HELP: &str = "(esc to quit)";
pub const ERROR_PREFIX: &str = "something went wrong: ";
/// Row of the input field within the prompt screen.
pub const FIELD_ROW: u16 = 2;

/// The screen selected by the precedence rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Prompt,
    Result(u16),
    Error(&'a ProbeError),
}

impl Screen<'_> {
    /// Whether the input field is drawn on this screen.
    pub fn shows_field(&self) -> bool {
        !matches!(self, Screen::Result(_))
    }
}

pub fn screen(app: &App) -> Screen<'_> {
    if let Some(error) = &app.last_error {
        return Screen::Error(error);
    }
    match app.last_result {
        Some(code) if code != 0 => Screen::Result(code),
        _ => Screen::Prompt,
    }
}

pub fn render(app: &App) -> String {
    match screen(app) {
        Screen::Prompt => prompt_view(app),
        Screen::Error(error) => format!("{}{ERROR_PREFIX}{error}", prompt_view(app)),
        Screen::Result(code) => status_line(code),
    }
}

fn prompt_view(app: &App) -> String {
    format!("{PROMPT}\n\n{}\n\n{HELP}\n", app.input.view())
}

fn status_line(code: u16) -> String {
    match status_text(code) {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}
