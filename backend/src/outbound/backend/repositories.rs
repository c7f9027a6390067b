//! Table-backed repository adapters over [`BackendClient`].
//!
//! Each method maps onto exactly one table API call; filters use the
//! `column=eq.value` syntax and listings are ordered newest first.

use async_trait::async_trait;
use uuid::Uuid;

use super::client::BackendClient;
use crate::domain::ports::{
    CategoryRepository, OrderRepository, ProductRepository, ProfileRepository, StoreError,
};
use crate::domain::{
    Category, CategoryDraft, CategoryPatch, NewProfile, Order, OrderDraft, OrderFilter,
    OrderPatch, Product, ProductDraft, ProductFilter, ProductPatch, Profile, ProfileId,
};

const PROFILES: &str = "profiles";
const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";
const ORDERS: &str = "orders";

fn eq(column: &'static str, value: impl std::fmt::Display) -> (&'static str, String) {
    (column, format!("eq.{value}"))
}

fn all_columns() -> (&'static str, String) {
    ("select", "*".to_owned())
}

fn newest_first() -> (&'static str, String) {
    ("order", "created_at.desc".to_owned())
}

async fn find_one<T>(client: &BackendClient, table: &str, id: Uuid) -> Result<Option<T>, StoreError>
where
    T: serde::de::DeserializeOwned,
{
    let rows: Vec<T> = client
        .select(table, &[all_columns(), eq("id", id)])
        .await?;
    Ok(rows.into_iter().next())
}

async fn delete_one(client: &BackendClient, table: &str, id: Uuid) -> Result<bool, StoreError> {
    Ok(client.delete(table, &[eq("id", id)]).await? > 0)
}

/// Profile rows in the `profiles` table.
#[derive(Clone)]
pub struct RestProfileRepository {
    client: BackendClient,
}

impl RestProfileRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        let rows: Vec<Profile> = self
            .client
            .select(PROFILES, &[all_columns(), eq("id", id)])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, profile: &NewProfile) -> Result<Profile, StoreError> {
        self.client.insert(PROFILES, profile).await
    }
}

/// Category rows in the `categories` table.
#[derive(Clone)]
pub struct RestCategoryRepository {
    client: BackendClient,
}

impl RestCategoryRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepository for RestCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.client
            .select(CATEGORIES, &[all_columns(), newest_first()])
            .await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        find_one(&self.client, CATEGORIES, id).await
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<Category, StoreError> {
        self.client.insert(CATEGORIES, draft).await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        self.client.update(CATEGORIES, &[eq("id", id)], patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        delete_one(&self.client, CATEGORIES, id).await
    }
}

/// Product rows in the `products` table.
#[derive(Clone)]
pub struct RestProductRepository {
    client: BackendClient,
}

impl RestProductRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductRepository for RestProductRepository {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let mut query = vec![all_columns(), newest_first()];
        if let Some(category_id) = filter.category_id {
            query.push(eq("category_id", category_id));
        }
        self.client.select(PRODUCTS, &query).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        find_one(&self.client, PRODUCTS, id).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        self.client.insert(PRODUCTS, draft).await
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Option<Product>, StoreError> {
        self.client.update(PRODUCTS, &[eq("id", id)], patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        delete_one(&self.client, PRODUCTS, id).await
    }
}

/// Order rows in the `orders` table.
#[derive(Clone)]
pub struct RestOrderRepository {
    client: BackendClient,
}

impl RestOrderRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for RestOrderRepository {
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let mut query = vec![all_columns(), newest_first()];
        if let Some(status) = filter.status {
            query.push(eq("status", status.as_str()));
        }
        self.client.select(ORDERS, &query).await
    }

    async fn find(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        find_one(&self.client, ORDERS, id).await
    }

    async fn create(&self, draft: &OrderDraft) -> Result<Order, StoreError> {
        self.client.insert(ORDERS, draft).await
    }

    async fn update(&self, id: Uuid, patch: &OrderPatch) -> Result<Option<Order>, StoreError> {
        self.client.update(ORDERS, &[eq("id", id)], patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        delete_one(&self.client, ORDERS, id).await
    }
}
