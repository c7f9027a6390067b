//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities the HTTP layer and the store
//! adapters exchange, plus the profile get-or-create service.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Profile, ProfileId, EnsureProfileRequest: profile provisioning types.
//! - Category / Product / Order with their drafts, patches, and filters.
//! - ObjectPath, UploadObject, StoredObject: upload bucket objects.
//! - ProfileService: implementation of the `ProfileCommand` driving port.

pub mod catalog;
pub mod error;
pub mod ports;
pub mod profile;
mod profile_service;
pub mod trace_id;
pub mod upload;

use serde_json::json;

pub use self::catalog::{
    CatalogValidationError, Category, CategoryDraft, CategoryPatch, Order, OrderDraft,
    OrderFilter, OrderPatch, OrderStatus, Product, ProductDraft, ProductFilter, ProductPatch,
};
pub use self::error::{Error, ErrorCode};
pub use self::profile::{
    EnsureProfileRequest, NewProfile, PROFILE_NAME_FALLBACK, Profile, ProfileId, ProfileRole,
    ProfileValidationError, derive_profile_name,
};
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::upload::{
    DEFAULT_CONTENT_TYPE, ObjectPath, ObjectPathError, StoredObject, UploadObject,
};

use self::ports::{ObjectStorageError, StoreError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront_admin::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Translate a store failure into the API error surfaced to callers.
///
/// Store messages pass through verbatim; the structured store code and
/// details travel in `details` so operators can correlate with store logs.
pub fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::NotConfigured => Error::configuration(error.to_string()),
        StoreError::Connection { message } => Error::backend(message),
        StoreError::UniqueViolation { message } => Error::backend(message)
            .with_details(json!({ "storeCode": "23505", "storeDetails": null })),
        StoreError::Rejected {
            code,
            message,
            details,
        } => Error::backend(message)
            .with_details(json!({ "storeCode": code, "storeDetails": details })),
        StoreError::Decode { message } => {
            Error::internal(format!("failed to decode store response: {message}"))
        }
    }
}

/// Translate an object storage failure into the API error surfaced to callers.
pub fn map_object_storage_error(error: ObjectStorageError) -> Error {
    match error {
        ObjectStorageError::NotConfigured => Error::configuration(error.to_string()),
        ObjectStorageError::Connection { message } | ObjectStorageError::Rejected { message } => {
            Error::backend(message)
        }
    }
}
