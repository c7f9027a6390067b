//! Contract tests for the reqwest store adapters against a stub HTTP server.
//!
//! Each test mounts the table or storage endpoint the adapter is expected to
//! call, so a request with the wrong path, filter, or header falls through to
//! wiremock's 404 and fails the assertion.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;
use storefront_admin::domain::ports::{
    CategoryRepository, ObjectStorage, ObjectStorageError, OrderRepository, ProductRepository,
    ProfileRepository, StoreError,
};
use storefront_admin::domain::{
    CategoryPatch, EnsureProfileRequest, NewProfile, ObjectPath, OrderFilter, OrderStatus,
    ProductFilter, ProfileId, UploadObject,
};
use storefront_admin::outbound::backend::{
    BackendClient, BackendConfig, RestCategoryRepository, RestObjectStorage, RestOrderRepository,
    RestProductRepository, RestProfileRepository,
};
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeroize::Zeroizing;

const SERVICE_KEY: &str = "service-role-key";
const BUCKET: &str = "product-images";
const CATEGORY_ID: &str = "5b0b3c62-8e57-4c1e-9f7a-0c1f9a7f2b10";

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(BackendConfig {
        base_url: Url::parse(&server.uri()).expect("mock server uri"),
        service_key: Zeroizing::new(SERVICE_KEY.to_owned()),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

#[fixture]
fn profile_id() -> ProfileId {
    ProfileId::new("8d0f1c9e-4b7a-4f1e-9a57-2f4c1d0b6a11").expect("valid profile id")
}

fn profile_row(id: &ProfileId) -> serde_json::Value {
    json!({
        "id": id.as_str(),
        "name": "ada",
        "role": "user",
        "created_at": "2026-01-05T10:00:00Z",
        "updated_at": "2026-01-05T10:00:00Z"
    })
}

fn category_row(name: &str) -> serde_json::Value {
    json!({
        "id": CATEGORY_ID,
        "name": name,
        "description": null,
        "created_at": "2026-01-05T10:00:00Z"
    })
}

#[rstest]
#[tokio::test]
async fn profile_lookup_sends_credentials_and_id_filter(profile_id: ProfileId) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{profile_id}")))
        .and(header("apikey", SERVICE_KEY))
        .and(header("authorization", format!("Bearer {SERVICE_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(&profile_id)])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestProfileRepository::new(client_for(&server));
    let found = repo
        .find_by_id(&profile_id)
        .await
        .expect("lookup succeeds")
        .expect("row present");

    assert_eq!(found.id, profile_id);
    assert_eq!(found.name, "ada");
}

#[rstest]
#[tokio::test]
async fn profile_lookup_returns_none_for_empty_result(profile_id: ProfileId) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repo = RestProfileRepository::new(client_for(&server));
    let found = repo.find_by_id(&profile_id).await.expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn duplicate_profile_insert_is_a_unique_violation(profile_id: ProfileId) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "id": profile_id.as_str(), "role": "user" })))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"profiles_pkey\"",
            "details": "Key (id) already exists.",
            "hint": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestProfileRepository::new(client_for(&server));
    let now = chrono::DateTime::parse_from_rfc3339("2026-01-05T10:00:00Z")
        .expect("timestamp")
        .to_utc();
    let new_profile = NewProfile::from_request(&EnsureProfileRequest::new(profile_id), now);
    let err = repo.insert(&new_profile).await.expect_err("insert collides");

    assert!(matches!(err, StoreError::UniqueViolation { .. }));
}

#[tokio::test]
async fn categories_are_listed_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([category_row("Outdoor")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestCategoryRepository::new(client_for(&server));
    let categories = CategoryRepository::list(&repo).await.expect("list succeeds");

    assert_eq!(categories.len(), 1);
    assert_eq!(categories.first().map(|c| c.name.as_str()), Some("Outdoor"));
}

#[tokio::test]
async fn category_update_without_matching_row_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", format!("eq.{CATEGORY_ID}")))
        .and(body_json(json!({ "name": "Garden" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestCategoryRepository::new(client_for(&server));
    let id = Uuid::parse_str(CATEGORY_ID).expect("uuid");
    let patch = CategoryPatch {
        name: Some("Garden".to_owned()),
        ..CategoryPatch::default()
    };
    let updated = CategoryRepository::update(&repo, id, &patch)
        .await
        .expect("update succeeds");

    assert!(updated.is_none());
}

#[tokio::test]
async fn category_delete_reports_whether_a_row_was_removed() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", format!("eq.{CATEGORY_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([category_row("Outdoor")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestCategoryRepository::new(client_for(&server));
    let id = Uuid::parse_str(CATEGORY_ID).expect("uuid");

    assert!(CategoryRepository::delete(&repo, id).await.expect("delete succeeds"));
}

#[tokio::test]
async fn product_listing_forwards_category_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("category_id", format!("eq.{CATEGORY_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestProductRepository::new(client_for(&server));
    let filter = ProductFilter {
        category_id: Some(Uuid::parse_str(CATEGORY_ID).expect("uuid")),
    };

    let products = ProductRepository::list(&repo, &filter)
        .await
        .expect("list succeeds");
    assert!(products.is_empty());
}

#[tokio::test]
async fn order_listing_forwards_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(query_param("status", "eq.shipped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RestOrderRepository::new(client_for(&server));
    let filter = OrderFilter {
        status: Some(OrderStatus::Shipped),
    };

    let orders = OrderRepository::list(&repo, &filter)
        .await
        .expect("list succeeds");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn store_rejections_keep_code_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "PGRST301",
            "message": "JWT expired"
        })))
        .mount(&server)
        .await;

    let repo = RestOrderRepository::new(client_for(&server));
    let err = OrderRepository::list(&repo, &OrderFilter::default())
        .await
        .expect_err("store rejects");

    assert_eq!(
        err,
        StoreError::Rejected {
            code: Some("PGRST301".to_owned()),
            message: "JWT expired".to_owned(),
            details: None,
        }
    );
}

#[tokio::test]
async fn malformed_rows_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "rows" })))
        .mount(&server)
        .await;

    let repo = RestCategoryRepository::new(client_for(&server));
    let err = CategoryRepository::list(&repo)
        .await
        .expect_err("body is not an array");

    assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn upload_posts_bytes_and_returns_public_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/product-images/[0-9a-f-]{36}\.png$"))
        .and(header("content-type", "image/png"))
        .and(header("apikey", SERVICE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ignored" })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = RestObjectStorage::new(client_for(&server), BUCKET);
    let object = UploadObject {
        path: ObjectPath::generate(Some("lamp.png")),
        content_type: "image/png".to_owned(),
        bytes: b"PNGDATA".to_vec(),
    };
    let stored = storage.upload(&object).await.expect("upload succeeds");

    assert_eq!(stored.path, object.path);
    assert_eq!(
        stored.url,
        format!(
            "{}/storage/v1/object/public/{BUCKET}/{}",
            server.uri(),
            object.path
        )
    );
}

#[tokio::test]
async fn upload_failure_surfaces_storage_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/product-images/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": "404",
            "error": "Bucket not found",
            "message": "Bucket not found"
        })))
        .mount(&server)
        .await;

    let storage = RestObjectStorage::new(client_for(&server), BUCKET);
    let object = UploadObject {
        path: ObjectPath::generate(None),
        content_type: "application/octet-stream".to_owned(),
        bytes: Vec::new(),
    };
    let err = storage.upload(&object).await.expect_err("bucket missing");

    assert_eq!(err, ObjectStorageError::rejected("Bucket not found"));
}

#[tokio::test]
async fn remove_sends_prefix_list() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/product-images"))
        .and(body_json(json!({ "prefixes": ["products/lamp.png"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let storage = RestObjectStorage::new(client_for(&server), BUCKET);
    let object_path = ObjectPath::new("products/lamp.png").expect("valid path");

    storage.remove(&object_path).await.expect("remove succeeds");
}
