//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::future::Future;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use storefront_admin::Trace;
#[cfg(debug_assertions)]
use storefront_admin::doc::ApiDoc;
use storefront_admin::inbound::http::api_scope;
use storefront_admin::inbound::http::health::{HealthState, live, ready};
use storefront_admin::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the store client cannot be built or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(config)?;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail the liveness check as soon as the process receives SIGINT or SIGTERM.
///
/// Actix drains in-flight requests after the same signal, so `/health/live`
/// reports 503 for the duration of the drain.
pub fn watch_for_shutdown(health_state: web::Data<HealthState>) {
    actix_web::rt::spawn(mark_unhealthy_on(shutdown_signal(), health_state));
}

async fn mark_unhealthy_on<F>(signal: F, health_state: web::Data<HealthState>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("shutdown requested; draining");
            health_state.mark_unhealthy();
        }
        Err(error) => warn!(%error, "shutdown signal listener failed"),
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    #[actix_web::test]
    async fn unconfigured_store_routes_answer_with_configuration_error() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().expect("literal address"),
            backend: None,
            storage_bucket: "product-images".to_owned(),
        };
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let http_state = build_http_state(&config).expect("state builds");
        let app = actix_test::init_service(build_app(health, http_state)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/products").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "configuration_error");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn shutdown_signal_fails_the_liveness_check() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();

        mark_unhealthy_on(async { Ok(()) }, health.clone()).await;

        assert!(!health.is_alive());
        assert!(health.is_ready());
    }

    #[actix_web::test]
    async fn failed_signal_listener_leaves_the_process_live() {
        let health = web::Data::new(HealthState::new());

        mark_unhealthy_on(
            async { Err(std::io::Error::other("no signal driver")) },
            health.clone(),
        )
        .await;

        assert!(health.is_alive());
    }
}
