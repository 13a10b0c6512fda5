//! Types for the compositor module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media file information from probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub path: PathBuf,
    /// Container format name (first entry of ffprobe's `format_name`).
    pub format: String,
    pub duration_secs: f64,
    pub video_codec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub has_audio: bool,
}

impl MediaInfo {
    /// Frame dimensions of the first video stream, if any.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}
