//! Trait definitions for the compositor module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::CompositorError;

/// Something that can burn an overlay image into a video.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Returns the name of this compositor implementation.
    fn name(&self) -> &str;

    /// Composites `overlay` onto every frame of `video`, writing `output`.
    ///
    /// Resolves with the output path once the file has been materialized.
    async fn composite(
        &self,
        video: &Path,
        overlay: &Path,
        output: &Path,
    ) -> Result<PathBuf, CompositorError>;

    /// Validates that the compositor is properly configured and ready.
    async fn validate(&self) -> Result<(), CompositorError>;
}
