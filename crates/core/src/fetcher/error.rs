//! Error types for the fetcher module.

use thiserror::Error;

/// Errors that can occur while downloading a remote file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, reset mid-body).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Writing the destination file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
