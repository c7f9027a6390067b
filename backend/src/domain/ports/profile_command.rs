//! Driving port for profile provisioning.
//!
//! Inbound adapters call this port so they never touch the repository
//! directly; the domain service owns the get-or-create rules.

use async_trait::async_trait;

use crate::domain::{EnsureProfileRequest, Error, Profile};

/// Domain use-case port returning an existing profile or creating it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Return the profile for `request.id`, creating it on first use.
    async fn ensure_profile(&self, request: EnsureProfileRequest) -> Result<Profile, Error>;
}
