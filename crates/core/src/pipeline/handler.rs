use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::compositor::Compositor;
use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};
use crate::metrics;
use crate::notifier::Notifier;
use crate::storage::Uploader;

use super::error::PipelineError;
use super::types::{JobInput, TriggerOutcome, TriggerRequest, WatermarkOutcome};
use super::workspace::{WorkingFiles, Workspace};

/// Settings the pipeline needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Topic for completion and trigger messages.
    pub topic: String,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            topic: config.notifier.topic.clone(),
        }
    }
}

/// Runs watermark requests end to end.
///
/// Stages run strictly in sequence within one request. The pipeline holds no
/// mutable state, so any number of requests may run on it concurrently.
pub struct WatermarkPipeline {
    config: PipelineConfig,
    workspace: Workspace,
    fetcher: Arc<dyn Fetcher>,
    compositor: Arc<dyn Compositor>,
    uploader: Arc<dyn Uploader>,
    notifier: Arc<dyn Notifier>,
}

impl WatermarkPipeline {
    pub fn new(
        config: PipelineConfig,
        workspace: Workspace,
        fetcher: Arc<dyn Fetcher>,
        compositor: Arc<dyn Compositor>,
        uploader: Arc<dyn Uploader>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            workspace,
            fetcher,
            compositor,
            uploader,
            notifier,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Resolves the request input and processes it.
    ///
    /// Invalid input is rejected before any collaborator is called.
    pub async fn handle(
        &self,
        uploaded: Option<WorkingFiles>,
        video_url: Option<String>,
        image_url: Option<String>,
    ) -> Result<WatermarkOutcome, PipelineError> {
        match JobInput::resolve(uploaded, video_url, image_url) {
            Ok(input) => self.process(input).await,
            Err(e) => Self::finish(Err(e)),
        }
    }

    /// Watermarks one video and returns the public URL of the result.
    pub async fn process(&self, input: JobInput) -> Result<WatermarkOutcome, PipelineError> {
        let result = self.run(input).await;
        Self::finish(result)
    }

    /// Publishes a trigger request to the topic without processing it.
    pub async fn trigger(&self, request: TriggerRequest) -> Result<TriggerOutcome, PipelineError> {
        let message = serde_json::to_string(&request).unwrap_or_default();

        let message_id = self
            .notifier
            .publish(&self.config.topic, &message)
            .await
            .map_err(|e| {
                error!(topic = %self.config.topic, "Failed to publish trigger: {}", e);
                PipelineError::PublishFailed(e)
            })?;

        info!(topic = %self.config.topic, message_id = %message_id, "Watermark process initiated");
        Ok(TriggerOutcome { message_id })
    }

    async fn run(&self, input: JobInput) -> Result<WatermarkOutcome, PipelineError> {
        let mut files = match input {
            JobInput::Uploaded(files) => {
                debug!("Processing uploaded files {:?}", files.video());
                files
            }
            JobInput::Remote {
                video_url,
                image_url,
            } => {
                let files = self.workspace.allocate();
                self.download(&video_url, &image_url, &files).await?;
                files
            }
        };

        timed(
            "composite",
            self.compositor
                .composite(files.video(), files.image(), files.output()),
        )
        .await
        .map_err(PipelineError::CompositeFailed)?;

        let url = match timed("upload", self.uploader.upload(files.output())).await {
            Ok(url) => url,
            Err(e) => {
                files.retain_output();
                return Err(PipelineError::UploadFailed(e));
            }
        };

        self.notify_completed(&url).await;

        Ok(WatermarkOutcome { url })
    }

    async fn download(
        &self,
        video_url: &str,
        image_url: &str,
        files: &WorkingFiles,
    ) -> Result<(), PipelineError> {
        timed("download", async {
            self.fetcher.fetch(video_url, files.video()).await?;
            self.fetcher.fetch(image_url, files.image()).await?;
            Ok::<(), FetchError>(())
        })
        .await
        .map_err(PipelineError::DownloadFailed)
    }

    async fn notify_completed(&self, url: &str) {
        let message = format!("Video processed and uploaded: {}", url);
        match timed("notify", self.notifier.publish(&self.config.topic, &message)).await {
            Ok(message_id) => debug!(message_id = %message_id, "Completion published"),
            Err(e) => {
                warn!(topic = %self.config.topic, "Failed to publish completion: {}", e);
                metrics::NOTIFY_FAILURES.inc();
            }
        }
    }

    /// Records a request that failed while its input was still being
    /// received, and hands the error back for the response.
    pub fn reject(&self, error: PipelineError) -> PipelineError {
        Self::record_failure(&error);
        error
    }

    fn finish(
        result: Result<WatermarkOutcome, PipelineError>,
    ) -> Result<WatermarkOutcome, PipelineError> {
        match &result {
            Ok(outcome) => {
                info!(url = %outcome.url, "Watermark job succeeded");
                metrics::JOBS_TOTAL.with_label_values(&["success"]).inc();
            }
            Err(e) => Self::record_failure(e),
        }
        result
    }

    fn record_failure(error: &PipelineError) {
        error!(kind = error.kind(), "Watermark job failed: {}", error);
        metrics::JOBS_TOTAL.with_label_values(&[error.kind()]).inc();
    }
}

async fn timed<T>(stage: &'static str, fut: impl Future<Output = T>) -> T {
    let start = Instant::now();
    let output = fut.await;
    metrics::STAGE_DURATION
        .with_label_values(&[stage])
        .observe(start.elapsed().as_secs_f64());
    output
}
