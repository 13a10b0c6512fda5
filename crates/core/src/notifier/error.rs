use thiserror::Error;

use crate::gcp::CredentialsError;

/// Errors that can occur while publishing a message.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("publish request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("publish returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Auth(#[from] CredentialsError),

    #[error("publish response contained no message id")]
    MissingMessageId,
}
