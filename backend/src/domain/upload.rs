//! Uploaded file objects and their keys inside the storage bucket.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Fallback content type for uploads that do not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const MAX_EXTENSION_LEN: usize = 10;

/// Validation errors returned by [`ObjectPath::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectPathError {
    #[error("object path must not be empty")]
    Empty,
    #[error("object path must be relative")]
    Absolute,
    #[error("object path must not contain empty, '.' or '..' segments")]
    InvalidSegment,
    #[error("object path must use '/' separators")]
    Backslash,
}

/// Key of an object inside the upload bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Validate a caller-supplied key.
    ///
    /// # Examples
    /// ```
    /// use storefront_admin::domain::ObjectPath;
    ///
    /// assert!(ObjectPath::new("products/lamp.png").is_ok());
    /// assert!(ObjectPath::new("../secrets").is_err());
    /// ```
    pub fn new(path: impl Into<String>) -> Result<Self, ObjectPathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ObjectPathError::Empty);
        }
        if path.starts_with('/') {
            return Err(ObjectPathError::Absolute);
        }
        if path.contains('\\') {
            return Err(ObjectPathError::Backslash);
        }
        if path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(ObjectPathError::InvalidSegment);
        }
        Ok(Self(path))
    }

    /// Generate a fresh key for an upload, keeping a short alphanumeric
    /// extension from the original file name when there is one.
    #[must_use]
    pub fn generate(original_name: Option<&str>) -> Self {
        let stem = Uuid::new_v4().to_string();
        match original_name.and_then(file_extension) {
            Some(ext) => Self(format!("{stem}.{ext}")),
            None => Self(stem),
        }
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let valid = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ObjectPath> for String {
    fn from(value: ObjectPath) -> Self {
        value.0
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = ObjectPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// File received from the admin panel, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadObject {
    pub path: ObjectPath,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredObject {
    #[schema(value_type = String, example = "0b7c1e2a-6f0e-4c38-9d0c-2b1f4f7d9e11.png")]
    pub path: ObjectPath,
    /// Public URL of the stored object.
    pub url: String,
}
