//! Driven port for the profile table.

use async_trait::async_trait;

use crate::domain::{NewProfile, Profile, ProfileId};

use super::StoreError;

/// Point lookup and unique insert over profile rows.
///
/// The store enforces uniqueness of `id`; adapters must report a colliding
/// insert as [`StoreError::UniqueViolation`] and never overwrite the row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile by identifier.
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError>;

    /// Insert a new profile and return the stored row.
    async fn insert(&self, profile: &NewProfile) -> Result<Profile, StoreError>;
}
