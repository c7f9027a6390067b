//! Profile provisioning service.
//!
//! Implements the get-or-create flow behind `POST /api/profiles/ensure`.
//! Concurrent first calls for the same id are resolved by the store's unique
//! constraint: the losing insert re-reads the winner's row once.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{ProfileCommand, ProfileRepository, StoreError};
use crate::domain::{EnsureProfileRequest, Error, NewProfile, Profile, ProfileId, map_store_error};

/// Profile service implementing the [`ProfileCommand`] driving port.
#[derive(Clone)]
pub struct ProfileService<R> {
    profile_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileService<R> {
    /// Create a service over `profile_repo`, stamping new rows with `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use storefront_admin::domain::ProfileService;
    /// # use storefront_admin::outbound::backend::{BackendClient, RestProfileRepository};
    /// # fn build(client: BackendClient) {
    /// let repo = Arc::new(RestProfileRepository::new(client));
    /// let _service = ProfileService::new(repo, Arc::new(DefaultClock));
    /// # }
    /// ```
    pub fn new(profile_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profile_repo,
            clock,
        }
    }
}

impl<R> ProfileService<R>
where
    R: ProfileRepository,
{
    async fn find(&self, id: &ProfileId) -> Result<Option<Profile>, Error> {
        self.profile_repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)
    }

    async fn reread_after_conflict(&self, id: &ProfileId) -> Result<Profile, Error> {
        match self.find(id).await? {
            Some(profile) => {
                debug!(profile_id = %id, "profile created concurrently; returning stored row");
                Ok(profile)
            }
            None => {
                warn!(profile_id = %id, "profile missing after unique violation");
                Err(Error::backend(format!(
                    "profile {id} not visible after concurrent creation"
                )))
            }
        }
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn ensure_profile(&self, request: EnsureProfileRequest) -> Result<Profile, Error> {
        if let Some(profile) = self.find(&request.id).await? {
            return Ok(profile);
        }

        let new_profile = NewProfile::from_request(&request, self.clock.utc());
        match self.profile_repo.insert(&new_profile).await {
            Ok(profile) => {
                info!(profile_id = %profile.id, "created profile");
                Ok(profile)
            }
            Err(StoreError::UniqueViolation { .. }) => {
                self.reread_after_conflict(&request.id).await
            }
            Err(err) => {
                warn!(profile_id = %request.id, error = %err, "profile insert failed");
                Err(map_store_error(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
