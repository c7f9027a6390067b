//! Tests for the profile provisioning service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Barrier;

use super::*;
use crate::domain::ports::MockProfileRepository;
use crate::domain::{ErrorCode, ProfileRole};
use crate::test_support::{FixedClock, InMemoryProfileRepository};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp")
}

fn profile_id(raw: &str) -> ProfileId {
    ProfileId::new(raw).expect("valid profile id")
}

fn stored_profile(id: &str, name: &str) -> Profile {
    Profile {
        id: profile_id(id),
        name: name.to_owned(),
        role: ProfileRole::User,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

fn make_service<R>(repo: R) -> ProfileService<R> {
    ProfileService::new(Arc::new(repo), Arc::new(FixedClock(fixed_now())))
}

fn request(id: &str, email: Option<&str>, name: Option<&str>) -> EnsureProfileRequest {
    EnsureProfileRequest {
        id: profile_id(id),
        email: email.map(str::to_owned),
        name: name.map(str::to_owned),
    }
}

#[tokio::test]
async fn existing_profile_is_returned_without_insert() {
    let existing = stored_profile("u1", "Ada");
    let returned = existing.clone();
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(returned)));
    repo.expect_insert().times(0);

    let profile = make_service(repo)
        .ensure_profile(request("u1", Some("other@example.com"), Some("Other")))
        .await
        .expect("existing profile");

    assert_eq!(profile, existing);
}

#[tokio::test]
async fn missing_profile_is_created_with_derived_name() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|new_profile| {
            new_profile.id.as_str() == "u1"
                && new_profile.name == "a.b"
                && new_profile.role == ProfileRole::User
                && new_profile.created_at == fixed_now()
                && new_profile.updated_at == fixed_now()
        })
        .times(1)
        .return_once(|_| Ok(stored_profile("u1", "a.b")));

    let profile = make_service(repo)
        .ensure_profile(request("u1", Some("a.b@example.com"), None))
        .await
        .expect("created profile");

    assert_eq!(profile.name, "a.b");
    assert_eq!(profile.role, ProfileRole::User);
    assert_eq!(profile.created_at, profile.updated_at);
}

#[tokio::test]
async fn unique_violation_returns_concurrently_created_row() {
    let winner = stored_profile("u1", "Winner");
    let reread = winner.clone();
    let mut repo = MockProfileRepository::new();
    let mut seq = mockall::Sequence::new();
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Err(StoreError::unique_violation("duplicate key")));
    repo.expect_find_by_id()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| Ok(Some(reread)));

    let profile = make_service(repo)
        .ensure_profile(request("u1", None, Some("Loser")))
        .await
        .expect("winner's row");

    assert_eq!(profile, winner);
}

#[tokio::test]
async fn empty_reread_after_unique_violation_is_backend_error() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id().times(2).returning(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(StoreError::unique_violation("duplicate key")));

    let error = make_service(repo)
        .ensure_profile(request("u1", None, None))
        .await
        .expect_err("row vanished");

    assert_eq!(error.code(), ErrorCode::BackendError);
    assert!(error.message().contains("u1"));
}

#[tokio::test]
async fn other_insert_failures_are_not_retried() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_insert().times(1).return_once(|_| {
        Err(StoreError::Rejected {
            code: Some("42501".to_owned()),
            message: "permission denied for table profiles".to_owned(),
            details: None,
        })
    });

    let error = make_service(repo)
        .ensure_profile(request("u1", None, None))
        .await
        .expect_err("insert rejected");

    assert_eq!(error.code(), ErrorCode::BackendError);
    assert_eq!(error.message(), "permission denied for table profiles");
    let details = error.details().expect("store details");
    assert_eq!(details["storeCode"], "42501");
}

#[tokio::test]
async fn unconfigured_store_is_configuration_error() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(StoreError::NotConfigured));
    repo.expect_insert().times(0);

    let error = make_service(repo)
        .ensure_profile(request("u1", None, None))
        .await
        .expect_err("not configured");

    assert_eq!(error.code(), ErrorCode::ConfigurationError);
}

#[tokio::test]
async fn lookup_failure_skips_insert() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Err(StoreError::connection("connection reset")));
    repo.expect_insert().times(0);

    let error = make_service(repo)
        .ensure_profile(request("u1", None, None))
        .await
        .expect_err("lookup failed");

    assert_eq!(error.code(), ErrorCode::BackendError);
}

#[tokio::test]
async fn repeated_calls_are_idempotent() {
    let service = make_service(InMemoryProfileRepository::new());

    let first = service
        .ensure_profile(request("u1", Some("first@example.com"), None))
        .await
        .expect("first call");
    let second = service
        .ensure_profile(request("u1", Some("second@example.com"), Some("Changed")))
        .await
        .expect("second call");

    assert_eq!(first, second);
    assert_eq!(second.name, "first");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_first_calls_converge_on_one_row() {
    let barrier = Arc::new(Barrier::new(2));
    let repo = Arc::new(InMemoryProfileRepository::with_lookup_barrier(barrier, 2));
    let service = Arc::new(ProfileService::new(
        Arc::clone(&repo),
        Arc::new(FixedClock(fixed_now())),
    ));

    let left = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.ensure_profile(request("u1", None, Some("Left"))).await })
    };
    let right = {
        let service = Arc::clone(&service);
        tokio::spawn(
            async move { service.ensure_profile(request("u1", None, Some("Right"))).await },
        )
    };

    let left = left.await.expect("left task").expect("left profile");
    let right = right.await.expect("right task").expect("right profile");

    assert_eq!(left, right);
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.insert_attempts(), 2);
}
