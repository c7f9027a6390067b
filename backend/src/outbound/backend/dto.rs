//! Wire shapes exchanged with the hosted data service.

use serde::{Deserialize, Serialize};

/// Structured error body returned by the table API.
///
/// `code` is the database SQLSTATE (`23505` for unique violations) or an API
/// error code such as `PGRST116`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct StoreErrorDto {
    #[serde(default)]
    pub(super) code: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) details: Option<String>,
    #[serde(default)]
    pub(super) hint: Option<String>,
}

/// Error body returned by the storage API.
#[derive(Debug, Default, Deserialize)]
pub(super) struct StorageErrorDto {
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Body of the bulk object removal call.
#[derive(Debug, Serialize)]
pub(super) struct RemoveObjectsDto<'a> {
    pub(super) prefixes: Vec<&'a str>,
}
