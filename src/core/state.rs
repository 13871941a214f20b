//! # Application State
//!
//! Core business state for meteo. This module contains domain logic only -
//! no TUI-specific types. Presentation lives in the `tui` module.
//!
//! ```text
//! App
//! ├── probe: Arc<dyn StatusProbe>   // network collaborator
//! ├── input: LocationInput          // the location being typed
//! ├── last_result: Option<u16>      // status code of the latest probe
//! ├── last_error: Option<ProbeError> // transport failure of the latest probe
//! └── should_quit: bool             // latched by Esc / Ctrl+C
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! `last_result` and `last_error` are never both set.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::input::LocationInput;
use crate::probe::{ProbeError, StatusProbe};

pub struct App {
    pub probe: Arc<dyn StatusProbe>,
    pub input: LocationInput,
    pub last_result: Option<u16>,
    pub last_error: Option<ProbeError>,
    pub should_quit: bool,
}

impl App {
    pub fn new(probe: Arc<dyn StatusProbe>, input: LocationInput) -> Self {
        Self {
            probe,
            input,
            last_result: None,
            last_error: None,
            should_quit: false,
        }
    }

    /// Create an App with the input field sized from the resolved config.
    pub fn from_config(probe: Arc<dyn StatusProbe>, config: &ResolvedConfig) -> Self {
        Self::new(probe, LocationInput::new(config.char_limit, config.input_width))
    }
}
