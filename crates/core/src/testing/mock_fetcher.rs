//! Mock fetcher for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, Fetcher};

/// A recorded download for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub url: String,
    pub dest: PathBuf,
    pub success: bool,
}

/// Mock implementation of the Fetcher trait.
///
/// Writes canned bytes to the destination instead of touching the network.
/// Failures leave no file behind, like the real fetcher.
///
/// # Example
///
/// ```rust,ignore
/// use watermark_core::testing::MockFetcher;
///
/// let fetcher = MockFetcher::new();
/// fetcher.fail_url("https://cdn.example.com/logo.png", 404).await;
///
/// // The video downloads, the overlay fails with HTTP 404
/// ```
#[derive(Debug)]
pub struct MockFetcher {
    fetches: Arc<RwLock<Vec<RecordedFetch>>>,
    /// Bytes written for every successful download.
    content: Arc<RwLock<Vec<u8>>>,
    /// URLs answered with the given HTTP status.
    failing_urls: Arc<RwLock<HashMap<String, u16>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(RwLock::new(Vec::new())),
            content: Arc::new(RwLock::new(b"mock-content".to_vec())),
            failing_urls: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded downloads.
    pub async fn recorded_fetches(&self) -> Vec<RecordedFetch> {
        self.fetches.read().await.clone()
    }

    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }

    /// Set the bytes written for successful downloads.
    pub async fn set_content(&self, content: impl Into<Vec<u8>>) {
        *self.content.write().await = content.into();
    }

    /// Make every download of `url` fail with `status`.
    pub async fn fail_url(&self, url: impl Into<String>, status: u16) {
        self.failing_urls.write().await.insert(url.into(), status);
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    async fn outcome(&self, url: &str) -> Option<FetchError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        self.failing_urls
            .read()
            .await
            .get(url)
            .map(|status| FetchError::Status {
                url: url.to_string(),
                status: *status,
            })
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let result = match self.outcome(url).await {
            Some(err) => Err(err),
            None => {
                let content = self.content.read().await.clone();
                tokio::fs::write(dest, &content)
                    .await
                    .map(|()| content.len() as u64)
                    .map_err(FetchError::from)
            }
        };

        self.fetches.write().await.push(RecordedFetch {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            success: result.is_ok(),
        });
        result
    }
}
