use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::compositor::CompositorConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub compositor: CompositorConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for request bodies, multipart uploads included.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 * 1024
}

/// Cross-origin policy for the browser front-end.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is accepted.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_allowed_headers() -> Vec<String> {
    ["X-Requested-With", "content-type", "Authorization"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

/// Google Cloud credentials shared by the storage and notification clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// Project owning the Pub/Sub topic. Falls back to the credentials' project.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Service account key file. When unset, application default credentials are used.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    /// Send requests without a bearer token (emulators, local testing).
    #[serde(default)]
    pub anonymous: bool,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Destination bucket name
    pub bucket: String,
    /// Base URL of the JSON API (e.g., "https://storage.googleapis.com")
    #[serde(default = "default_storage_api")]
    pub api_base_url: String,
    /// Override for the public URL prefix. Defaults to `https://<bucket>.storage.googleapis.com`.
    #[serde(default)]
    pub public_url_base: Option<String>,
}

fn default_storage_api() -> String {
    "https://storage.googleapis.com".to_string()
}

/// Notification bus configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Topic receiving completion and trigger messages
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Base URL of the Pub/Sub REST API
    #[serde(default = "default_pubsub_api")]
    pub api_base_url: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            api_base_url: default_pubsub_api(),
        }
    }
}

fn default_topic() -> String {
    "watermarking".to_string()
}

fn default_pubsub_api() -> String {
    "https://pubsub.googleapis.com".to_string()
}

/// Remote file download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connection establishment timeout. The transfer itself is unbounded.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("watermark-core/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

/// Working directory for per-request temporary files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_dir")]
    pub dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir: default_workspace_dir(),
        }
    }
}

fn default_workspace_dir() -> PathBuf {
    PathBuf::from("uploads")
}

/// Sanitized config for API responses (credential locations redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub google: SanitizedGoogleConfig,
    pub storage: StorageConfig,
    pub notifier: NotifierConfig,
    pub compositor: SanitizedCompositorConfig,
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGoogleConfig {
    pub project_id: Option<String>,
    pub credentials_configured: bool,
    pub anonymous: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCompositorConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub ffmpeg_log_level: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            cors: config.cors.clone(),
            google: SanitizedGoogleConfig {
                project_id: config.google.project_id.clone(),
                credentials_configured: config.google.credentials_path.is_some(),
                anonymous: config.google.anonymous,
            },
            storage: config.storage.clone(),
            notifier: config.notifier.clone(),
            compositor: SanitizedCompositorConfig {
                ffmpeg_path: config.compositor.ffmpeg_path.clone(),
                ffprobe_path: config.compositor.ffprobe_path.clone(),
                ffmpeg_log_level: config.compositor.ffmpeg_log_level.clone(),
            },
            workspace: config.workspace.clone(),
        }
    }
}
