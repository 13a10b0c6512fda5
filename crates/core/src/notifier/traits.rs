use async_trait::async_trait;

use super::error::NotifyError;

/// Publishes messages to a topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publishes `message` to `topic` and returns the assigned message id.
    async fn publish(&self, topic: &str, message: &str) -> Result<String, NotifyError>;
}
