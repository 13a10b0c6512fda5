use thiserror::Error;

use crate::compositor::CompositorError;
use crate::fetcher::FetchError;
use crate::notifier::NotifyError;
use crate::storage::StorageError;

/// Errors that can end a watermark request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither both files nor both URLs were supplied.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to download files: {0}")]
    DownloadFailed(#[source] FetchError),

    #[error("Failed to apply watermark: {0}")]
    CompositeFailed(#[source] CompositorError),

    #[error("Cloud Storage upload failed: {0}")]
    UploadFailed(#[source] StorageError),

    #[error("Failed to publish message: {0}")]
    PublishFailed(#[source] NotifyError),

    /// Writing an uploaded file into the working directory failed.
    #[error("Failed to store uploaded file: {0}")]
    Workspace(#[source] std::io::Error),
}

impl PipelineError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DownloadFailed(_) => "download_failed",
            Self::CompositeFailed(_) => "composite_failed",
            Self::UploadFailed(_) => "upload_failed",
            Self::PublishFailed(_) => "publish_failed",
            Self::Workspace(_) => "workspace",
        }
    }

    pub(crate) fn missing_input() -> Self {
        Self::InvalidInput("Either files or URLs must be provided.".to_string())
    }
}
