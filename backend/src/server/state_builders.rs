//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use storefront_admin::domain::ProfileService;
use storefront_admin::inbound::http::state::{HttpState, HttpStatePorts};
use storefront_admin::outbound::backend::{
    BackendClient, BackendClientError, BackendConfig, RestCategoryRepository, RestObjectStorage,
    RestOrderRepository, RestProductRepository, RestProfileRepository, UnconfiguredBackend,
};

use super::ServerConfig;

/// Ports backed by the hosted data service.
fn rest_ports(
    backend: BackendConfig,
    storage_bucket: &str,
) -> Result<HttpStatePorts, BackendClientError> {
    let client = BackendClient::new(backend)?;
    let profile_repo = Arc::new(RestProfileRepository::new(client.clone()));
    Ok(HttpStatePorts {
        profiles: Arc::new(ProfileService::new(profile_repo, Arc::new(DefaultClock))),
        categories: Arc::new(RestCategoryRepository::new(client.clone())),
        products: Arc::new(RestProductRepository::new(client.clone())),
        orders: Arc::new(RestOrderRepository::new(client.clone())),
        storage: Arc::new(RestObjectStorage::new(client, storage_bucket)),
    })
}

/// Ports that refuse every call with a configuration error.
fn unconfigured_ports() -> HttpStatePorts {
    let backend = Arc::new(UnconfiguredBackend);
    HttpStatePorts {
        profiles: Arc::new(ProfileService::new(backend.clone(), Arc::new(DefaultClock))),
        categories: backend.clone(),
        products: backend.clone(),
        orders: backend.clone(),
        storage: backend,
    }
}

/// Build the shared HTTP state, falling back to [`UnconfiguredBackend`] when
/// no store credentials were supplied.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the store client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let ports = match config.backend.clone() {
        Some(backend) => {
            info!(
                store_url = %backend.base_url,
                bucket = %config.storage_bucket,
                "using hosted store"
            );
            rest_ports(backend, &config.storage_bucket).map_err(|err| {
                std::io::Error::other(format!("failed to build store client: {err}"))
            })?
        }
        None => {
            warn!("store_url or service_key not set; store-backed routes will fail");
            unconfigured_ports()
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
