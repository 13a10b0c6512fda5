//! Google Cloud credentials shared by the storage and notification clients.
//!
//! Credentials are resolved once at startup and handed to each client, so the
//! clients never reach for process-wide singletons.

mod credentials;

pub use credentials::{CredentialsError, GoogleCredentials, PUBSUB_SCOPE, STORAGE_SCOPE};
