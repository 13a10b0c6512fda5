//! Durable storage for finished videos.
//!
//! An [`Uploader`] moves a local file into the object store and hands back a
//! public URL. The object key is the file's base name.

mod error;
mod gcs;
mod traits;

pub use error::StorageError;
pub use gcs::{key_for, GcsUploader};
pub use traits::Uploader;
