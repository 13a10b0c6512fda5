//! Completion and trigger notifications.
//!
//! A [`Notifier`] publishes short text messages to a named topic on the
//! publish/subscribe bus and returns the id the bus assigned.

mod error;
mod pubsub;
mod traits;

pub use error::NotifyError;
pub use pubsub::PubSubNotifier;
pub use traits::Notifier;
