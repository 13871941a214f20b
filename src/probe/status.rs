use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;

/// Transport-level failures of a probe.
///
/// HTTP error statuses are not failures; they come back as `Ok(status)`.
/// Every variant carries the underlying description, which is what `Display`
/// prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request did not complete within the configured timeout.
    Timeout(String),
    /// DNS resolution or the TCP/TLS connection failed.
    Connect(String),
    /// Any other transport failure (reset connection, protocol error, ...).
    Request(String),
    /// The probe could not be built or the target URL is invalid. Not retryable.
    Config(String),
}

impl ProbeError {
    /// Classify a reqwest error, keeping its full source chain as the description.
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let description = describe(error);
        if error.is_timeout() {
            ProbeError::Timeout(description)
        } else if error.is_connect() {
            ProbeError::Connect(description)
        } else if error.is_builder() {
            ProbeError::Config(description)
        } else {
            ProbeError::Request(description)
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ProbeError::Timeout(msg)
            | ProbeError::Connect(msg)
            | ProbeError::Request(msg)
            | ProbeError::Config(msg) => msg,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for ProbeError {}

/// Join an error with its sources: `outer: inner: root cause`.
fn describe(error: &dyn std::error::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.ends_with(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}

/// Standard reason phrase for an HTTP status code, if it has one.
pub fn status_text(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

/// A single-shot network check.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Issue one request and return its status code.
    async fn check(&self) -> Result<u16, ProbeError>;
}
