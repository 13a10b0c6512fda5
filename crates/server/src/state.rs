use std::sync::Arc;
use watermark_core::{Config, SanitizedConfig, WatermarkPipeline};

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: Arc<WatermarkPipeline>,
}

impl AppState {
    pub fn new(config: Config, pipeline: Arc<WatermarkPipeline>) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn pipeline(&self) -> &WatermarkPipeline {
        self.pipeline.as_ref()
    }
}
