//! HTTP(S) fetcher backed by reqwest.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::FetcherConfig;

use super::error::FetchError;
use super::traits::Fetcher;

/// Plain GET-and-stream downloader.
///
/// Redirects follow reqwest's default policy. Content type and size are not
/// checked; the compositor rejects anything it cannot decode.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        debug!(url, dest = %dest.display(), "Downloading");

        match self.download(url, dest).await {
            Ok(bytes) => {
                info!(url, bytes, dest = %dest.display(), "Download complete");
                Ok(bytes)
            }
            Err(e) => {
                match tokio::fs::remove_file(dest).await {
                    Ok(()) => debug!(dest = %dest.display(), "Removed partial download"),
                    Err(rm) if rm.kind() == std::io::ErrorKind::NotFound => {}
                    Err(rm) => warn!(
                        dest = %dest.display(),
                        "Failed to remove partial download: {}", rm
                    ),
                }
                Err(e)
            }
        }
    }
}
