//! Mock uploader for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{key_for, StorageError, Uploader};

/// A recorded upload for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub path: PathBuf,
    pub key: String,
    /// Size of the local file at upload time.
    pub size: u64,
    pub success: bool,
}

/// Mock implementation of the Uploader trait.
///
/// Mirrors the real contract: the local file is removed on success and kept
/// on failure. URLs use the public bucket host format.
#[derive(Debug)]
pub struct MockUploader {
    bucket: String,
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    next_error: Arc<RwLock<Option<StorageError>>>,
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUploader {
    pub fn new() -> Self {
        Self::with_bucket("mock-bucket")
    }

    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            uploads: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded uploads.
    pub async fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }

    /// Configure the next upload to fail with the given error.
    pub async fn set_next_error(&self, error: StorageError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn upload(&self, path: &Path) -> Result<String, StorageError> {
        let key = key_for(path)?;
        let size = tokio::fs::metadata(path).await?.len();

        let result = match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => {
                tokio::fs::remove_file(path).await?;
                Ok(format!("https://{}.storage.googleapis.com/{}", self.bucket, key))
            }
        };

        self.uploads.write().await.push(RecordedUpload {
            path: path.to_path_buf(),
            key,
            size,
            success: result.is_ok(),
        });
        result
    }
}
