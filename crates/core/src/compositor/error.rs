//! Error types for the compositor module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compositing a watermark.
#[derive(Debug, Error)]
pub enum CompositorError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// FFmpeg ran but did not produce the output.
    #[error("FFmpeg failed: {}", diagnostic(.reason, .stderr))]
    Failed {
        reason: String,
        stderr: Option<String>,
    },

    /// Failed to probe media file.
    #[error("Failed to probe media file: {reason}")]
    ProbeFailed { reason: String },

    /// I/O error while running the external tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn diagnostic(reason: &str, stderr: &Option<String>) -> String {
    match stderr {
        Some(text) if !text.trim().is_empty() => format!("{}: {}", reason, text.trim()),
        _ => reason.to_string(),
    }
}

impl CompositorError {
    /// Creates a new failure carrying the tool's diagnostic output.
    pub fn failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new probe failed error.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_includes_stderr() {
        let err = CompositorError::failed(
            "exit code 1",
            Some("Invalid data found when processing input\n".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "FFmpeg failed: exit code 1: Invalid data found when processing input"
        );
    }

    #[test]
    fn test_failed_message_without_stderr() {
        let err = CompositorError::failed("output file not created", None);
        assert_eq!(err.to_string(), "FFmpeg failed: output file not created");
    }
}
