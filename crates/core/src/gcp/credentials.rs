use std::fmt;
use std::sync::Arc;

use gcp_auth::{CustomServiceAccount, TokenProvider};
use thiserror::Error;
use tracing::info;

use crate::config::GoogleConfig;

/// OAuth scope for Cloud Storage object writes.
pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// OAuth scope for Pub/Sub publishing.
pub const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Errors raised while resolving Google credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// Token or key handling failed inside `gcp_auth`.
    #[error("Google authentication failed: {0}")]
    Auth(#[from] gcp_auth::Error),

    /// No project id configured and none derivable from the credentials.
    #[error("google.project_id is required with anonymous credentials")]
    MissingProject,
}

/// Source of bearer tokens for Google APIs.
#[derive(Clone)]
pub enum GoogleCredentials {
    /// Tokens from a service account key or application default credentials.
    Provider(Arc<dyn TokenProvider>),
    /// No authentication header at all (emulators, tests).
    Anonymous,
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(_) => f.write_str("GoogleCredentials::Provider"),
            Self::Anonymous => f.write_str("GoogleCredentials::Anonymous"),
        }
    }
}

impl GoogleCredentials {
    /// Resolves credentials from configuration.
    ///
    /// Order: `anonymous`, then an explicit key file, then application default
    /// credentials discovered by `gcp_auth`.
    pub async fn from_config(config: &GoogleConfig) -> Result<Self, CredentialsError> {
        if config.anonymous {
            info!("Using anonymous Google credentials");
            return Ok(Self::Anonymous);
        }

        if let Some(path) = &config.credentials_path {
            info!("Loading service account key from {:?}", path);
            let account = CustomServiceAccount::from_file(path)?;
            return Ok(Self::Provider(Arc::new(account)));
        }

        info!("Using application default credentials");
        Ok(Self::Provider(gcp_auth::provider().await?))
    }

    /// Returns a bearer token for `scope`, or `None` for anonymous access.
    pub async fn bearer_token(&self, scope: &str) -> Result<Option<String>, CredentialsError> {
        match self {
            Self::Provider(provider) => {
                let token = provider.token(&[scope]).await?;
                Ok(Some(token.as_str().to_string()))
            }
            Self::Anonymous => Ok(None),
        }
    }

    /// Project id from the explicit config, falling back to the credentials.
    pub async fn project_id(&self, configured: Option<&str>) -> Result<String, CredentialsError> {
        if let Some(project) = configured {
            return Ok(project.to_string());
        }
        match self {
            Self::Provider(provider) => Ok(provider.project_id().await?.to_string()),
            Self::Anonymous => Err(CredentialsError::MissingProject),
        }
    }
}
