//! Stand-in adapter used when no store credentials are configured.
//!
//! The server still starts and serves health checks; every data or storage
//! call fails with a configuration error instead of reaching the network.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    CategoryRepository, ObjectStorage, ObjectStorageError, OrderRepository, ProductRepository,
    ProfileRepository, StoreError,
};
use crate::domain::{
    Category, CategoryDraft, CategoryPatch, NewProfile, ObjectPath, Order, OrderDraft,
    OrderFilter, OrderPatch, Product, ProductDraft, ProductFilter, ProductPatch, Profile,
    ProfileId, StoredObject, UploadObject,
};

/// Implements every driven port by refusing with `NotConfigured`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBackend;

#[async_trait]
impl ProfileRepository for UnconfiguredBackend {
    async fn find_by_id(&self, _id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn insert(&self, _profile: &NewProfile) -> Result<Profile, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl CategoryRepository for UnconfiguredBackend {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Category>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn create(&self, _draft: &CategoryDraft) -> Result<Category, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn update(
        &self,
        _id: Uuid,
        _patch: &CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl ProductRepository for UnconfiguredBackend {
    async fn list(&self, _filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Product>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn create(&self, _draft: &ProductDraft) -> Result<Product, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn update(&self, _id: Uuid, _patch: &ProductPatch) -> Result<Option<Product>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl OrderRepository for UnconfiguredBackend {
    async fn list(&self, _filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Order>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn create(&self, _draft: &OrderDraft) -> Result<Order, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn update(&self, _id: Uuid, _patch: &OrderPatch) -> Result<Option<Order>, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl ObjectStorage for UnconfiguredBackend {
    async fn upload(&self, _object: &UploadObject) -> Result<StoredObject, ObjectStorageError> {
        Err(ObjectStorageError::not_configured())
    }

    async fn remove(&self, _path: &ObjectPath) -> Result<(), ObjectStorageError> {
        Err(ObjectStorageError::not_configured())
    }
}
