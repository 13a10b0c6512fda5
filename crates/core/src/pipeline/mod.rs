//! Watermark orchestration.
//!
//! [`WatermarkPipeline`] drives one request through
//! download → composite → upload → notify and owns the working files of that
//! request for its whole lifetime. Every stage failure maps to a
//! [`PipelineError`]; notification failures are logged and swallowed.

mod error;
mod handler;
mod types;
mod workspace;

pub use error::PipelineError;
pub use handler::{PipelineConfig, WatermarkPipeline};
pub use types::{JobInput, TriggerOutcome, TriggerRequest, WatermarkOutcome};
pub use workspace::{WorkingFiles, Workspace};
