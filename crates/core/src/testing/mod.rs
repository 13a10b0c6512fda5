//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the four collaborator
//! traits, so the pipeline and the HTTP layer can be exercised without
//! ffmpeg, network access or Google Cloud.
//!
//! # Example
//!
//! ```rust,ignore
//! use watermark_core::testing::{MockCompositor, MockFetcher, MockNotifier, MockUploader};
//!
//! let uploader = MockUploader::with_bucket("watermarks");
//! let notifier = MockNotifier::new();
//!
//! // Make the completion notification fail; the request still succeeds
//! notifier.set_next_error(NotifyError::MissingMessageId).await;
//! ```

mod mock_compositor;
mod mock_fetcher;
mod mock_notifier;
mod mock_uploader;

pub use mock_compositor::{MockCompositor, RecordedComposite};
pub use mock_fetcher::{MockFetcher, RecordedFetch};
pub use mock_notifier::{MockNotifier, PublishedMessage};
pub use mock_uploader::{MockUploader, RecordedUpload};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{load_config_from_str, Config};

    /// Minimal configuration for a bucket, with anonymous credentials and
    /// working files under `workspace_dir`.
    pub fn config(bucket: &str, workspace_dir: &std::path::Path) -> Config {
        let mut config = load_config_from_str(&format!(
            r#"
[google]
project_id = "test-project"
anonymous = true

[storage]
bucket = "{}"
"#,
            bucket
        ))
        .expect("fixture config parses");
        config.workspace.dir = workspace_dir.to_path_buf();
        config
    }
}
