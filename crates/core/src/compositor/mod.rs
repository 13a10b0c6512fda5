//! Compositor module for watermarking videos.
//!
//! This module provides the `Compositor` trait and an FFmpeg-backed
//! implementation that overlays a semi-transparent image onto every frame of
//! a video.
//!
//! The overlay is always scaled to the video's frame size, blended at 50%
//! opacity and centered. The output is encoded with H.264 (CRF 18, `veryfast`
//! preset). None of this is configurable per call.
//!
//! # Example
//!
//! ```ignore
//! use watermark_core::compositor::{Compositor, CompositorConfig, FfmpegCompositor};
//!
//! let compositor = FfmpegCompositor::new(CompositorConfig::default());
//! compositor.validate().await?;
//!
//! let output = compositor
//!     .composite(Path::new("in.mp4"), Path::new("logo.png"), Path::new("out.mp4"))
//!     .await?;
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::CompositorConfig;
pub use error::CompositorError;
pub use ffmpeg::{FfmpegCompositor, OVERLAY_FILTER_GRAPH, OVERLAY_OPACITY};
pub use traits::Compositor;
pub use types::MediaInfo;
