//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! for tests and behind the `test-support` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use tokio::sync::Barrier;

use crate::domain::ports::{ProfileRepository, StoreError};
use crate::domain::{NewProfile, Profile, ProfileId};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Profile table held in memory with the store's uniqueness semantics.
///
/// A second insert for an existing id fails with
/// [`StoreError::UniqueViolation`] and leaves the first row untouched.
///
/// With [`InMemoryProfileRepository::with_lookup_barrier`] the first
/// `gated` lookups wait on a shared barrier, which lets tests force several
/// callers past the "not found" check before any of them inserts.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    rows: Mutex<HashMap<ProfileId, Profile>>,
    gate: Option<LookupGate>,
    inserts: AtomicUsize,
}

struct LookupGate {
    barrier: Arc<Barrier>,
    remaining: AtomicUsize,
}

impl InMemoryProfileRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty repository whose first `gated` lookups rendezvous on `barrier`.
    pub fn with_lookup_barrier(barrier: Arc<Barrier>, gated: usize) -> Self {
        Self {
            gate: Some(LookupGate {
                barrier,
                remaining: AtomicUsize::new(gated),
            }),
            ..Self::default()
        }
    }

    /// Seed a row directly.
    pub fn seed(&self, profile: Profile) {
        self.lock_rows().insert(profile.id.clone(), profile);
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of insert attempts, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn lock_rows(&self) -> MutexGuard<'_, HashMap<ProfileId, Profile>> {
        match self.rows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    async fn pass_gate(&self) {
        let Some(gate) = &self.gate else {
            return;
        };
        let claimed = gate
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if claimed {
            gate.barrier.wait().await;
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        let found = self.lock_rows().get(id).cloned();
        self.pass_gate().await;
        Ok(found)
    }

    async fn insert(&self, profile: &NewProfile) -> Result<Profile, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.lock_rows();
        if rows.contains_key(&profile.id) {
            return Err(StoreError::unique_violation(format!(
                "duplicate key value violates unique constraint \"profiles_pkey\" ({})",
                profile.id
            )));
        }
        let stored = Profile {
            id: profile.id.clone(),
            name: profile.name.clone(),
            role: profile.role,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };
        rows.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}
