//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::input::LocationInput;
use crate::core::state::App;
use crate::probe::{ProbeError, StatusProbe};

/// A probe that answers with a canned outcome and counts its calls.
pub struct StubProbe {
    outcome: Result<u16, ProbeError>,
    pub calls: AtomicUsize,
}

impl StubProbe {
    pub fn status(code: u16) -> Self {
        Self {
            outcome: Ok(code),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ProbeError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StatusProbe for StubProbe {
    fn name(&self) -> &str {
        "stub"
    }

    async fn check(&self) -> Result<u16, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Creates a test App backed by a probe that always answers 200.
pub fn test_app() -> App {
    App::new(Arc::new(StubProbe::status(200)), LocationInput::default())
}
