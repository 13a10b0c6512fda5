use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::metrics;

/// Directory holding the working files of in-flight requests.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if it does not exist yet.
    pub async fn ensure_exists(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Reserves a fresh set of paths for one request.
    ///
    /// Names carry a millisecond timestamp plus 8 hex chars of a v4 UUID, so
    /// concurrent requests never share a path. Nothing is created on disk.
    pub fn allocate(&self) -> WorkingFiles {
        let stamp = chrono::Utc::now().timestamp_millis();
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        let suffix = &uuid[..8];

        WorkingFiles {
            video: self.dir.join(format!("video_{}_{}.mp4", stamp, suffix)),
            image: self.dir.join(format!("image_{}_{}.png", stamp, suffix)),
            output: self.dir.join(format!("watermarked_{}_{}.mp4", stamp, suffix)),
            retain_output: false,
        }
    }
}

/// Source video, overlay image and output video of one request.
///
/// Dropping the value removes the sources, and the output unless
/// [`retain_output`](Self::retain_output) was called. Removal failures are
/// logged and counted, never returned.
#[derive(Debug)]
pub struct WorkingFiles {
    video: PathBuf,
    image: PathBuf,
    output: PathBuf,
    retain_output: bool,
}

impl WorkingFiles {
    pub fn video(&self) -> &Path {
        &self.video
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Keeps the output file on disk when this value is dropped.
    pub fn retain_output(&mut self) {
        self.retain_output = true;
    }
}

impl Drop for WorkingFiles {
    fn drop(&mut self) {
        remove_quietly(&self.video);
        remove_quietly(&self.image);
        if self.retain_output {
            debug!("Retaining output {:?}", self.output);
        } else {
            remove_quietly(&self.output);
        }
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed working file {:?}", path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!("Failed to remove working file {:?}: {}", path, e);
            metrics::CLEANUP_FAILURES.inc();
        }
    }
}
