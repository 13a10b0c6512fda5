use std::path::PathBuf;
use thiserror::Error;

use crate::gcp::CredentialsError;

/// Errors that can occur while uploading to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("object store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Auth(#[from] CredentialsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path has no usable file name to derive an object key from.
    #[error("cannot derive an object key from {path}")]
    InvalidPath { path: PathBuf },
}
