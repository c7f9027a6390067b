//! Driven port for the object storage bucket holding product images.

use async_trait::async_trait;

use crate::domain::{ObjectPath, StoredObject, UploadObject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ObjectStorageError {
        /// Storage credentials were not supplied at startup.
        NotConfigured => "object storage is not configured",
        /// The storage service could not be reached.
        Connection { message: String } => "object storage connection failed: {message}",
        /// The storage service answered with an error status.
        Rejected { message: String } => "object storage rejected the request: {message}",
    }
}

/// Upload and removal of objects in the configured bucket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `object` and return its path and public URL.
    async fn upload(&self, object: &UploadObject) -> Result<StoredObject, ObjectStorageError>;

    /// Remove the object at `path`. Removing a missing object succeeds.
    async fn remove(&self, path: &ObjectPath) -> Result<(), ObjectStorageError>;
}
