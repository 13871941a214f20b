//! HTTP probe: one GET against a fixed URL, reporting only the status code.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::probe::{ProbeError, StatusProbe};

/// Default client-side timeout for a probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    /// Build a probe for `url` with the given request timeout.
    ///
    /// Fails with `ProbeError::Config` if the URL does not parse or the
    /// client cannot be constructed.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProbeError> {
        let url = url.into();
        reqwest::Url::parse(&url)
            .map_err(|e| ProbeError::Config(format!("invalid probe URL {url:?}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::from_reqwest(&e))?;

        info!("HTTP probe targets {} (timeout {:?})", url, timeout);
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusProbe for HttpProbe {
    fn name(&self) -> &str {
        "http"
    }

    async fn check(&self) -> Result<u16, ProbeError> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            let error = ProbeError::from_reqwest(&e);
            warn!("Probe of {} failed: {}", self.url, error);
            error
        })?;

        let status = response.status();
        debug!("Probe of {} returned {}", self.url, status);
        Ok(status.as_u16())
    }
}
