//! Google Cloud Pub/Sub publisher over the REST API.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NotifierConfig;
use crate::gcp::{GoogleCredentials, PUBSUB_SCOPE};

use super::error::NotifyError;
use super::traits::Notifier;

#[derive(Serialize)]
struct PublishRequest<'a> {
    messages: [PubsubMessage<'a>; 1],
}

#[derive(Serialize)]
struct PubsubMessage<'a> {
    data: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

/// Publishes to topics of one project.
pub struct PubSubNotifier {
    client: Client,
    credentials: GoogleCredentials,
    project_id: String,
    api_base_url: String,
}

impl PubSubNotifier {
    pub fn new(
        config: &NotifierConfig,
        project_id: impl Into<String>,
        credentials: GoogleCredentials,
    ) -> Self {
        Self::with_client(Client::new(), config, project_id, credentials)
    }

    pub fn with_client(
        client: Client,
        config: &NotifierConfig,
        project_id: impl Into<String>,
        credentials: GoogleCredentials,
    ) -> Self {
        Self {
            client,
            credentials,
            project_id: project_id.into(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn publish_url(&self, topic: &str) -> String {
        format!(
            "{}/v1/projects/{}/topics/{}:publish",
            self.api_base_url,
            urlencoding::encode(&self.project_id),
            urlencoding::encode(topic)
        )
    }
}

#[async_trait]
impl Notifier for PubSubNotifier {
    async fn publish(&self, topic: &str, message: &str) -> Result<String, NotifyError> {
        let data = STANDARD.encode(message);
        let body = PublishRequest {
            messages: [PubsubMessage { data: &data }],
        };

        debug!(topic, project = %self.project_id, "Publishing message");

        let mut request = self.client.post(self.publish_url(topic)).json(&body);
        if let Some(token) = self.credentials.bearer_token(PUBSUB_SCOPE).await? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PublishResponse = response.json().await?;
        let message_id = parsed
            .message_ids
            .into_iter()
            .next()
            .ok_or(NotifyError::MissingMessageId)?;

        info!(topic, message_id = %message_id, "Published message");
        Ok(message_id)
    }
}
