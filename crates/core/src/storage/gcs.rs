//! Google Cloud Storage uploader using the JSON API media upload.

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::gcp::{GoogleCredentials, STORAGE_SCOPE};

use super::error::StorageError;
use super::traits::Uploader;

/// Derives the object key for a local file: its base name.
pub fn key_for(path: &Path) -> Result<String, StorageError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StorageError::InvalidPath {
            path: path.to_path_buf(),
        })
}

/// Uploads files into a single bucket.
pub struct GcsUploader {
    client: Client,
    credentials: GoogleCredentials,
    bucket: String,
    api_base_url: String,
    public_url_base: String,
}

impl GcsUploader {
    pub fn new(config: &StorageConfig, credentials: GoogleCredentials) -> Self {
        Self::with_client(Client::new(), config, credentials)
    }

    pub fn with_client(
        client: Client,
        config: &StorageConfig,
        credentials: GoogleCredentials,
    ) -> Self {
        let public_url_base = config
            .public_url_base
            .clone()
            .unwrap_or_else(|| format!("https://{}.storage.googleapis.com", config.bucket));

        Self {
            client,
            credentials,
            bucket: config.bucket.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            public_url_base: public_url_base.trim_end_matches('/').to_string(),
        }
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url_base, urlencoding::encode(key))
    }

    fn upload_url(&self, key: &str) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.api_base_url,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl Uploader for GcsUploader {
    async fn upload(&self, path: &Path) -> Result<String, StorageError> {
        let key = key_for(path)?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();

        debug!(bucket = %self.bucket, key = %key, size, "Uploading object");

        let mut request = self
            .client
            .post(self.upload_url(&key))
            .header(CONTENT_TYPE, content_type.as_ref())
            .header(CONTENT_LENGTH, size)
            .body(Body::wrap_stream(ReaderStream::new(file)));

        if let Some(token) = self.credentials.bearer_token(STORAGE_SCOPE).await? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let url = self.public_url(&key);
        info!(bucket = %self.bucket, key = %key, size, "Uploaded object");

        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!("Failed to remove uploaded file {:?}: {}", path, e);
        }

        Ok(url)
    }
}
