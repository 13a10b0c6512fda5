//! Remote file acquisition.
//!
//! A [`Fetcher`] downloads a URL straight to a local path. Partial output is
//! removed when the transfer fails, so a failed fetch never leaves a truncated
//! file behind.

mod error;
mod http;
mod traits;

pub use error::FetchError;
pub use http::HttpFetcher;
pub use traits::Fetcher;
