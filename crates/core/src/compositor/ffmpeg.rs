//! FFmpeg-based compositor implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::config::CompositorConfig;
use super::error::CompositorError;
use super::traits::Compositor;
use super::types::MediaInfo;

/// Opacity applied to the overlay's alpha channel.
pub const OVERLAY_OPACITY: f32 = 0.5;

/// Filter graph: fit the overlay (input 1) to the video (input 0), halve its
/// alpha, and center it on the video.
pub const OVERLAY_FILTER_GRAPH: &str = "[1:v][0:v]scale2ref=w=main_w:h=main_h[wm][base];\
[wm]format=rgba,colorchannelmixer=aa=0.5[wm_trans];\
[base][wm_trans]overlay=(main_w-overlay_w)/2:(main_h-overlay_h)/2[out]";

const VIDEO_CODEC: &str = "libx264";
const CRF: &str = "18";
const PRESET: &str = "veryfast";

/// Number of trailing stderr lines kept as diagnostic text.
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg-based compositor implementation.
pub struct FfmpegCompositor {
    config: CompositorConfig,
}

impl FfmpegCompositor {
    /// Creates a new FFmpeg compositor with the given configuration.
    pub fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    /// Creates a compositor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CompositorConfig::default())
    }

    /// Builds the ffmpeg argument list for one watermark job.
    fn build_args(&self, video: &Path, overlay: &Path, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            video.to_string_lossy().to_string(),
            "-i".to_string(),
            overlay.to_string_lossy().to_string(),
            "-filter_complex".to_string(),
            OVERLAY_FILTER_GRAPH.to_string(),
            "-map".to_string(),
            "[out]".to_string(),
            // Keep the source audio when there is one
            "-map".to_string(),
            "0:a?".to_string(),
            "-c:v".to_string(),
            VIDEO_CODEC.to_string(),
            "-crf".to_string(),
            CRF.to_string(),
            "-preset".to_string(),
            PRESET.to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ];

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());
        args.push(output.to_string_lossy().to_string());

        args
    }

    /// Probes a media file with ffprobe.
    pub async fn probe(&self, path: &Path) -> Result<MediaInfo, CompositorError> {
        if !path.exists() {
            return Err(CompositorError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CompositorError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    CompositorError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(CompositorError::probe_failed(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }

    /// Parses ffprobe JSON output into MediaInfo.
    fn parse_probe_output(path: &Path, output: &str) -> Result<MediaInfo, CompositorError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            duration: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
        }

        let probe: ProbeOutput = serde_json::from_str(output).map_err(|e| {
            CompositorError::probe_failed(format!("Failed to parse ffprobe output: {}", e))
        })?;

        let video_stream = probe.streams.iter().find(|s| s.codec_type == "video");

        Ok(MediaInfo {
            path: path.to_path_buf(),
            format: probe
                .format
                .format_name
                .split(',')
                .next()
                .unwrap_or("unknown")
                .to_string(),
            duration_secs: probe
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
                .unwrap_or(0.0),
            video_codec: video_stream.and_then(|s| s.codec_name.clone()),
            width: video_stream.and_then(|s| s.width),
            height: video_stream.and_then(|s| s.height),
            has_audio: probe.streams.iter().any(|s| s.codec_type == "audio"),
        })
    }

    fn spawn_error(&self, e: std::io::Error) -> CompositorError {
        if e.kind() == std::io::ErrorKind::NotFound {
            CompositorError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            CompositorError::Io(e)
        }
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn composite(
        &self,
        video: &Path,
        overlay: &Path,
        output: &Path,
    ) -> Result<PathBuf, CompositorError> {
        let start = Instant::now();
        info!(
            video = %video.display(),
            overlay = %overlay.display(),
            output = %output.display(),
            "Starting video processing"
        );

        let args = self.build_args(video, overlay, output);
        debug!("ffmpeg {}", args.join(" "));

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);
        if let Some(stderr) = child.stderr.take() {
            // ffmpeg echoes metadata verbatim, so lines are not guaranteed UTF-8
            let mut lines = BufReader::new(stderr).split(b'\n');
            loop {
                let raw = match lines.next_segment().await {
                    Ok(Some(raw)) => raw,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read ffmpeg stderr: {}", e);
                        break;
                    }
                };
                let line = String::from_utf8_lossy(&raw).trim_end_matches('\r').to_string();
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
        }

        let status = child.wait().await?;
        let stderr_text = if tail.is_empty() {
            None
        } else {
            Some(Vec::from(tail).join("\n"))
        };

        if !status.success() {
            warn!(
                code = ?status.code(),
                "Error during video processing: {}",
                stderr_text.as_deref().unwrap_or("<no output>")
            );
            return Err(CompositorError::failed(
                format!("ffmpeg exited with code: {:?}", status.code()),
                stderr_text,
            ));
        }

        if tokio::fs::metadata(output).await.is_err() {
            return Err(CompositorError::failed(
                "Output file not created",
                stderr_text,
            ));
        }

        info!(
            output = %output.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Video processing completed"
        );
        Ok(output.to_path_buf())
    }

    async fn validate(&self) -> Result<(), CompositorError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !result.status.success() {
            return Err(CompositorError::failed(
                "ffmpeg -version returned a non-zero status",
                Some(String::from_utf8_lossy(&result.stderr).to_string()),
            ));
        }

        Ok(())
    }
}
