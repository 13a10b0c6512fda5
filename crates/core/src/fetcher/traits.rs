//! Trait definitions for the fetcher module.

use async_trait::async_trait;
use std::path::Path;

use super::error::FetchError;

/// Downloads remote resources to local files.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Streams `url` into `dest`, returning the number of bytes written.
    ///
    /// On failure `dest` must not exist when the error is returned.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}
