//! Error type shared by every pipeline stage.
//!
//! "Not found" is not an error: stages return `Ok(None)` for that. Everything
//! in [`Error`] is an unexpected failure that aborts the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure (DNS, TLS, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// The page or API response did not have the expected shape.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// A heute quality label that is not part of the preference ranking.
    #[error("unknown quality label {0:?}")]
    UnknownQuality(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Writing the result to stdout/stderr failed.
    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
