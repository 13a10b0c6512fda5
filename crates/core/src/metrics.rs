//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Watermark jobs (outcome per request)
//! - Pipeline stages (download, composite, upload, notify)
//! - Best-effort side effects (notifications, working-file cleanup)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Jobs
// =============================================================================

/// Watermark jobs total by result.
pub static JOBS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("watermark_jobs_total", "Total watermark jobs by result"),
        &["result"], // "success", "invalid_input", "download_failed", ...
    )
    .unwrap()
});

/// Stage duration in seconds.
pub static STAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "watermark_stage_duration_seconds",
            "Duration of each pipeline stage",
        )
        .buckets(vec![
            0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0,
        ]),
        &["stage"], // "download", "composite", "upload", "notify"
    )
    .unwrap()
});

// =============================================================================
// Best-effort side effects
// =============================================================================

/// Completion notifications that failed to publish.
pub static NOTIFY_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "watermark_notify_failures_total",
        "Completion notifications that failed to publish",
    )
    .unwrap()
});

/// Working files that could not be removed.
pub static CLEANUP_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "watermark_cleanup_failures_total",
        "Working files that could not be removed",
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(JOBS_TOTAL.clone()),
        Box::new(STAGE_DURATION.clone()),
        Box::new(NOTIFY_FAILURES.clone()),
        Box::new(CLEANUP_FAILURES.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_register_once() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        JOBS_TOTAL.with_label_values(&["success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"watermark_jobs_total".to_string()));
    }
}
