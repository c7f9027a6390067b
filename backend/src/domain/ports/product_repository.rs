//! Driven port for the product table.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Product, ProductDraft, ProductFilter, ProductPatch};

use super::StoreError;

/// CRUD over product rows, one store call per method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products matching `filter`, newest first.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Fetch one product.
    async fn find(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    /// Insert a product and return the stored row.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError>;

    /// Apply `patch`; `None` when no row matched.
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>, StoreError>;

    /// Delete a product; `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
