//! Driven port for the category table.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, CategoryDraft, CategoryPatch};

use super::StoreError;

/// CRUD over category rows, one store call per method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List categories, newest first.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    /// Fetch one category.
    async fn find(&self, id: Uuid) -> Result<Option<Category>, StoreError>;

    /// Insert a category and return the stored row.
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, StoreError>;

    /// Apply `patch`; `None` when no row matched.
    async fn update(&self, id: Uuid, patch: &CategoryPatch)
    -> Result<Option<Category>, StoreError>;

    /// Delete a category; `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
