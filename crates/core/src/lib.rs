//! Video watermarking core: configuration, collaborator adapters and the
//! orchestration pipeline.

pub mod compositor;
pub mod config;
pub mod fetcher;
pub mod gcp;
pub mod metrics;
pub mod notifier;
pub mod pipeline;
pub mod storage;
pub mod testing;

pub use compositor::{Compositor, CompositorConfig, CompositorError, FfmpegCompositor};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use gcp::{CredentialsError, GoogleCredentials};
pub use notifier::{Notifier, NotifyError, PubSubNotifier};
pub use pipeline::{
    JobInput, PipelineConfig, PipelineError, TriggerOutcome, TriggerRequest, WatermarkOutcome,
    WatermarkPipeline, WorkingFiles, Workspace,
};
pub use storage::{GcsUploader, StorageError, Uploader};
