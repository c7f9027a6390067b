//! Catalogue records managed from the admin panel: categories, products, and
//! orders.
//!
//! Rows mirror the store's columns (snake_case) because handlers forward them
//! almost verbatim. Drafts and patches carry the small amount of validation
//! this service owns; everything else (foreign keys, uniqueness) is left to
//! the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Validation failures for catalogue drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogValidationError {
    /// A required text field is empty once trimmed.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    /// A numeric field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    /// A numeric field is below zero.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    /// Order items are not a JSON array.
    #[error("items must be a JSON array")]
    ItemsNotArray,
    /// A patch without any field set.
    #[error("update must set at least one field")]
    EmptyPatch,
}

impl CatalogValidationError {
    /// Offending request field, when the failure concerns a single field.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Blank { field } | Self::NotFinite { field } | Self::Negative { field } => {
                Some(field)
            }
            Self::ItemsNotArray => Some("items"),
            Self::EmptyPatch => None,
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank_field",
            Self::NotFinite { .. } => "not_finite",
            Self::Negative { .. } => "negative_value",
            Self::ItemsNotArray => "items_not_array",
            Self::EmptyPatch => "empty_patch",
        }
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), CatalogValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogValidationError::Blank { field });
    }
    Ok(())
}

fn require_amount(value: f64, field: &'static str) -> Result<(), CatalogValidationError> {
    if !value.is_finite() {
        return Err(CatalogValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(CatalogValidationError::Negative { field });
    }
    Ok(())
}

fn require_count(value: i64, field: &'static str) -> Result<(), CatalogValidationError> {
    if value < 0 {
        return Err(CatalogValidationError::Negative { field });
    }
    Ok(())
}

fn require_items(value: &Value) -> Result<(), CatalogValidationError> {
    if value.is_array() {
        Ok(())
    } else {
        Err(CatalogValidationError::ItemsNotArray)
    }
}

fn empty_items() -> Value {
    Value::Array(Vec::new())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Product category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Outdoor")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryDraft {
    /// Check the draft before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text(&self.name, "name")
    }
}

/// Partial update for a category; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryPatch {
    /// Check the patch before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(CatalogValidationError::EmptyPatch);
        }
        if let Some(name) = &self.name {
            require_text(name, "name")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Trail running shoe")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = 89.5)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Check the draft before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text(&self.name, "name")?;
        require_amount(self.price, "price")?;
        require_count(self.stock, "stock")
    }
}

/// Partial update for a product; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Check the patch before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if *self == Self::default() {
            return Err(CatalogValidationError::EmptyPatch);
        }
        if let Some(name) = &self.name {
            require_text(name, "name")?;
        }
        if let Some(price) = self.price {
            require_amount(price, "price")?;
        }
        if let Some(stock) = self.stock {
            require_count(stock, "stock")?;
        }
        Ok(())
    }
}

/// Optional filters for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Only return products in this category.
    pub category_id: Option<Uuid>,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Column value used by the store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    #[schema(example = 129.0)]
    pub total: f64,
    #[serde(default = "empty_items")]
    #[schema(value_type = Vec<serde_json::Value>)]
    pub items: Value,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDraft {
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub total: f64,
    #[serde(default = "empty_items")]
    #[schema(value_type = Vec<serde_json::Value>)]
    pub items: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
}

impl OrderDraft {
    /// Check the draft before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        require_text(&self.customer_name, "customer_name")?;
        require_amount(self.total, "total")?;
        require_items(&self.items)
    }
}

/// Partial update for an order; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<serde_json::Value>>)]
    pub items: Option<Value>,
}

impl OrderPatch {
    /// Check the patch before it is forwarded to the store.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if *self == Self::default() {
            return Err(CatalogValidationError::EmptyPatch);
        }
        if let Some(name) = &self.customer_name {
            require_text(name, "customer_name")?;
        }
        if let Some(total) = self.total {
            require_amount(total, "total")?;
        }
        if let Some(items) = &self.items {
            require_items(items)?;
        }
        Ok(())
    }
}

/// Optional filters for listing orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    /// Only return orders in this state.
    pub status: Option<OrderStatus>,
}
