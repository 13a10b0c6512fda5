//! Mock compositor for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::compositor::{Compositor, CompositorError};

/// A recorded composite call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedComposite {
    pub video: PathBuf,
    pub overlay: PathBuf,
    pub output: PathBuf,
    pub success: bool,
}

/// Mock implementation of the Compositor trait.
///
/// Requires both inputs to exist, then writes a small placeholder output.
#[derive(Debug)]
pub struct MockCompositor {
    composites: Arc<RwLock<Vec<RecordedComposite>>>,
    next_error: Arc<RwLock<Option<CompositorError>>>,
    available: Arc<RwLock<bool>>,
}

impl Default for MockCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompositor {
    pub fn new() -> Self {
        Self {
            composites: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            available: Arc::new(RwLock::new(true)),
        }
    }

    /// Get all recorded composite calls.
    pub async fn recorded_composites(&self) -> Vec<RecordedComposite> {
        self.composites.read().await.clone()
    }

    pub async fn composite_count(&self) -> usize {
        self.composites.read().await.len()
    }

    /// Configure the next composite to fail with the given error.
    pub async fn set_next_error(&self, error: CompositorError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make `validate` report a missing ffmpeg binary.
    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    async fn run(&self, video: &Path, overlay: &Path, output: &Path) -> Result<(), CompositorError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        for input in [video, overlay] {
            if !input.exists() {
                return Err(CompositorError::InputNotFound {
                    path: input.to_path_buf(),
                });
            }
        }
        tokio::fs::write(output, b"mock-watermarked").await?;
        Ok(())
    }
}

#[async_trait]
impl Compositor for MockCompositor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn composite(
        &self,
        video: &Path,
        overlay: &Path,
        output: &Path,
    ) -> Result<PathBuf, CompositorError> {
        let result = self.run(video, overlay, output).await;

        self.composites.write().await.push(RecordedComposite {
            video: video.to_path_buf(),
            overlay: overlay.to_path_buf(),
            output: output.to_path_buf(),
            success: result.is_ok(),
        });

        result.map(|()| output.to_path_buf())
    }

    async fn validate(&self) -> Result<(), CompositorError> {
        if *self.available.read().await {
            Ok(())
        } else {
            Err(CompositorError::FfmpegNotFound {
                path: PathBuf::from("ffmpeg"),
            })
        }
    }
}
