//! Profile entity and the rules used when a profile is first provisioned.
//!
//! Profiles are keyed by an identifier issued by the authentication provider,
//! so this module never generates identifiers itself.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Display name assigned when neither a name nor a usable email is supplied.
pub const PROFILE_NAME_FALLBACK: &str = "User";

/// Validation errors returned by [`ProfileId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    /// Identifier is empty once trimmed of whitespace.
    #[error("profile id must not be empty")]
    EmptyId,
}

/// Caller-supplied profile identifier.
///
/// Opaque to this service; the only invariant is that it is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    /// Validate and construct a [`ProfileId`].
    ///
    /// # Examples
    /// ```
    /// use storefront_admin::domain::ProfileId;
    ///
    /// assert!(ProfileId::new("auth0|42").is_ok());
    /// assert!(ProfileId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProfileValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProfileId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Access role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    /// Panel administrator.
    Admin,
    /// Regular account; assigned to every newly provisioned profile.
    #[default]
    User,
}

/// Stored profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    #[schema(value_type = String, example = "8d0f1c9e-4b7a-4f1e-9a57-2f4c1d0b6a11")]
    pub id: ProfileId,
    #[schema(example = "ada.lovelace")]
    pub name: String,
    pub role: ProfileRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row inserted when a profile does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub id: ProfileId,
    pub name: String,
    pub role: ProfileRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProfile {
    /// Build the insert payload for `request`, stamping both timestamps with `now`.
    #[must_use]
    pub fn from_request(request: &EnsureProfileRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: request.id.clone(),
            name: derive_profile_name(request.name.as_deref(), request.email.as_deref()),
            role: ProfileRole::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input to the ensure-profile operation.
///
/// `email` and `name` are hints consulted only when a new row is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureProfileRequest {
    pub id: ProfileId,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl EnsureProfileRequest {
    /// Request without any naming hints.
    #[must_use]
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            email: None,
            name: None,
        }
    }
}

/// Pick the display name for a new profile.
///
/// Priority: explicit `name`, then the part of `email` before the first `@`,
/// then [`PROFILE_NAME_FALLBACK`]. Empty strings count as absent.
///
/// # Examples
/// ```
/// use storefront_admin::domain::{derive_profile_name, PROFILE_NAME_FALLBACK};
///
/// assert_eq!(derive_profile_name(None, Some("a.b@example.com")), "a.b");
/// assert_eq!(derive_profile_name(Some("Ada"), Some("a.b@example.com")), "Ada");
/// assert_eq!(derive_profile_name(None, None), PROFILE_NAME_FALLBACK);
/// ```
#[must_use]
pub fn derive_profile_name<'a>(name: Option<&'a str>, email: Option<&'a str>) -> String {
    name.filter(|value| !value.is_empty())
        .or_else(|| {
            email
                .and_then(|value| value.split('@').next())
                .filter(|local| !local.is_empty())
        })
        .unwrap_or(PROFILE_NAME_FALLBACK)
        .to_owned()
}
