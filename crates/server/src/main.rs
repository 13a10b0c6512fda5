use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watermark_core::{
    load_config, validate_config, Compositor, FfmpegCompositor, GcsUploader, GoogleCredentials,
    HttpFetcher, PipelineConfig, PubSubNotifier, WatermarkPipeline, Workspace,
};
use watermark_server::api::create_router;
use watermark_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("WATERMARK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Bucket: {}", config.storage.bucket);
    info!("Topic: {}", config.notifier.topic);
    info!("Working directory: {:?}", config.workspace.dir);

    // Google credentials shared by storage and notifications
    let credentials = GoogleCredentials::from_config(&config.google)
        .await
        .context("Failed to resolve Google credentials")?;
    let project_id = credentials
        .project_id(config.google.project_id.as_deref())
        .await
        .context("Failed to determine Google Cloud project")?;
    info!("Google Cloud project: {}", project_id);

    let workspace = Workspace::new(&config.workspace.dir);
    workspace
        .ensure_exists()
        .await
        .with_context(|| format!("Failed to create working directory {:?}", workspace.dir()))?;

    let fetcher = HttpFetcher::new(&config.fetcher).context("Failed to create HTTP client")?;

    let compositor = FfmpegCompositor::new(config.compositor.clone());
    match compositor.validate().await {
        Ok(()) => info!("Using compositor: {}", compositor.name()),
        Err(e) => warn!("Compositor unavailable, watermark jobs will fail: {}", e),
    }

    let uploader = GcsUploader::new(&config.storage, credentials.clone());
    let notifier = PubSubNotifier::new(&config.notifier, project_id, credentials);

    let pipeline = WatermarkPipeline::new(
        PipelineConfig::from(&config),
        workspace,
        Arc::new(fetcher),
        Arc::new(compositor),
        Arc::new(uploader),
        Arc::new(notifier),
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(pipeline)));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
