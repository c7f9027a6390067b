//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{
    MockCategoryRepository, MockObjectStorage, MockOrderRepository, MockProductRepository,
    MockProfileCommand,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked port bundle. Unconfigured mocks panic when called, so tests only
/// set expectations on the ports they exercise.
#[derive(Default)]
pub struct MockPorts {
    pub profiles: MockProfileCommand,
    pub categories: MockCategoryRepository,
    pub products: MockProductRepository,
    pub orders: MockOrderRepository,
    pub storage: MockObjectStorage,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            profiles: Arc::new(self.profiles),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            orders: Arc::new(self.orders),
            storage: Arc::new(self.storage),
        })
    }
}

/// Send `request` through the full API scope and decode the JSON response.
///
/// Empty bodies decode as [`Value::Null`].
pub async fn call_json(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}
