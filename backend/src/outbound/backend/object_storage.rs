//! Object storage adapter for the product image bucket.

use async_trait::async_trait;

use super::client::BackendClient;
use crate::domain::ports::{ObjectStorage, ObjectStorageError};
use crate::domain::{ObjectPath, StoredObject, UploadObject};

/// Stores uploads in one bucket of the hosted storage API.
#[derive(Clone)]
pub struct RestObjectStorage {
    client: BackendClient,
    bucket: String,
}

impl RestObjectStorage {
    pub fn new(client: BackendClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for RestObjectStorage {
    async fn upload(&self, object: &UploadObject) -> Result<StoredObject, ObjectStorageError> {
        self.client
            .upload_object(
                &self.bucket,
                object.path.as_str(),
                &object.content_type,
                object.bytes.clone(),
            )
            .await?;
        let url = self
            .client
            .public_object_url(&self.bucket, object.path.as_str())?;
        Ok(StoredObject {
            path: object.path.clone(),
            url,
        })
    }

    async fn remove(&self, path: &ObjectPath) -> Result<(), ObjectStorageError> {
        self.client
            .remove_objects(&self.bucket, &[path.as_str()])
            .await
    }
}
