//! End-to-end tests for `POST /api/profiles/ensure`.
//!
//! Requests travel through the real `ProfileService` and an in-memory profile
//! table with the store's uniqueness semantics, so first-create, idempotence,
//! and concurrent creation are exercised without a network.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use chrono::{DateTime, Utc};
use futures_util::future::join;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use storefront_admin::Trace;
use storefront_admin::domain::{Profile, ProfileId, ProfileRole, ProfileService};
use storefront_admin::inbound::http::api_scope;
use storefront_admin::inbound::http::state::{HttpState, HttpStatePorts};
use storefront_admin::outbound::backend::UnconfiguredBackend;
use storefront_admin::test_support::{FixedClock, InMemoryProfileRepository};
use tokio::sync::Barrier;

#[fixture]
fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-14T09:30:00Z")
        .expect("valid timestamp")
        .to_utc()
}

fn state_for(repo: Arc<InMemoryProfileRepository>, now: DateTime<Utc>) -> web::Data<HttpState> {
    let unconfigured = Arc::new(UnconfiguredBackend);
    web::Data::new(HttpState::new(HttpStatePorts {
        profiles: Arc::new(ProfileService::new(repo, Arc::new(FixedClock(now)))),
        categories: unconfigured.clone(),
        products: unconfigured.clone(),
        orders: unconfigured.clone(),
        storage: unconfigured,
    }))
}

fn ensure_request(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/profiles/ensure")
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn first_call_creates_profile_with_derived_name(now: DateTime<Utc>) {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let app = actix_test::init_service(
        App::new()
            .app_data(state_for(repo.clone(), now))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        ensure_request(json!({ "id": "u-100", "email": "grace.hopper@example.com" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["profile"]["id"], "u-100");
    assert_eq!(body["profile"]["name"], "grace.hopper");
    assert_eq!(body["profile"]["role"], "user");
    assert_eq!(body["profile"]["created_at"], body["profile"]["updated_at"]);
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn repeated_calls_return_the_stored_row_unchanged(now: DateTime<Utc>) {
    let repo = Arc::new(InMemoryProfileRepository::new());
    repo.seed(Profile {
        id: ProfileId::new("u-200").expect("profile id"),
        name: "Existing".to_owned(),
        role: ProfileRole::Admin,
        created_at: now,
        updated_at: now,
    });
    let app = actix_test::init_service(
        App::new()
            .app_data(state_for(repo.clone(), now))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    for _ in 0..2 {
        let res = actix_test::call_service(
            &app,
            ensure_request(json!({ "id": "u-200", "name": "Ignored" })).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["profile"]["name"], "Existing");
        assert_eq!(body["profile"]["role"], "admin");
    }
    assert_eq!(repo.insert_attempts(), 0);
}

#[rstest]
#[actix_web::test]
async fn concurrent_first_calls_converge_on_one_row(now: DateTime<Utc>) {
    let barrier = Arc::new(Barrier::new(2));
    let repo = Arc::new(InMemoryProfileRepository::with_lookup_barrier(barrier, 2));
    let app = actix_test::init_service(
        App::new()
            .app_data(state_for(repo.clone(), now))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let (first, second) = join(
        actix_test::call_service(
            &app,
            ensure_request(json!({ "id": "u-300", "name": "First" })).to_request(),
        ),
        actix_test::call_service(
            &app,
            ensure_request(json!({ "id": "u-300", "name": "Second" })).to_request(),
        ),
    )
    .await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    let first_body: Value = actix_test::read_body_json(first).await;
    let second_body: Value = actix_test::read_body_json(second).await;
    assert_eq!(first_body["profile"], second_body["profile"]);
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.insert_attempts(), 2);
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "id": "   " }))]
#[actix_web::test]
async fn missing_or_blank_id_is_rejected(now: DateTime<Utc>, #[case] body: Value) {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let app = actix_test::init_service(
        App::new()
            .app_data(state_for(repo.clone(), now))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let res = actix_test::call_service(&app, ensure_request(body).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "id");
    assert_eq!(repo.insert_attempts(), 0);
}

#[rstest]
#[actix_web::test]
async fn catalogue_routes_report_missing_configuration(now: DateTime<Utc>) {
    let repo = Arc::new(InMemoryProfileRepository::new());
    let app = actix_test::init_service(
        App::new()
            .app_data(state_for(repo, now))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/categories").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "configuration_error");
}
