//! Outbound HTTP.
//!
//! Scrapers only see the [`Fetch`] trait so they can be driven by fixtures in
//! tests. [`HttpFetcher`] is the `reqwest` implementation used by both binaries.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A GET-only HTTP client that treats any non-2xx status as an error.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url` with the given extra headers and return the body as text.
    async fn get_text(&self, url: &str, headers: &[(&str, String)]) -> Result<String>;
}

/// [`Fetch`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get_text(&self, url: &str, headers: &[(&str, String)]) -> Result<String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success response");
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}
