use async_trait::async_trait;
use std::path::Path;

use super::error::StorageError;

/// Pushes finished files to durable storage.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads `path` and returns its public URL.
    ///
    /// The local file is removed after a successful upload and left in place
    /// on failure.
    async fn upload(&self, path: &Path) -> Result<String, StorageError>;
}
