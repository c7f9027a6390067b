//! Driven port for the order table.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Order, OrderDraft, OrderFilter, OrderPatch};

use super::StoreError;

/// CRUD over order rows, one store call per method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List orders matching `filter`, newest first.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError>;

    /// Fetch one order.
    async fn find(&self, id: Uuid) -> Result<Option<Order>, StoreError>;

    /// Insert an order and return the stored row.
    async fn create(&self, draft: &OrderDraft) -> Result<Order, StoreError>;

    /// Apply `patch`; `None` when no row matched.
    async fn update(&self, id: Uuid, patch: &OrderPatch) -> Result<Option<Order>, StoreError>;

    /// Delete an order; `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
