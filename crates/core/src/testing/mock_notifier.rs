//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{Notifier, NotifyError};

/// A recorded publish for test assertions.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub message: String,
    pub message_id: Option<String>,
}

/// Mock implementation of the Notifier trait.
///
/// Successful publishes get sequential ids: `mock-message-1`, `mock-message-2`, ...
#[derive(Debug)]
pub struct MockNotifier {
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
    next_error: Arc<RwLock<Option<NotifyError>>>,
    next_id: AtomicU64,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Get all publish attempts, failed ones included.
    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    pub async fn publish_count(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Configure the next publish to fail with the given error.
    pub async fn set_next_error(&self, error: NotifyError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn publish(&self, topic: &str, message: &str) -> Result<String, NotifyError> {
        let result = match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(format!(
                "mock-message-{}",
                self.next_id.fetch_add(1, Ordering::SeqCst)
            )),
        };

        self.messages.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            message: message.to_string(),
            message_id: result.as_ref().ok().cloned(),
        });
        result
    }
}
