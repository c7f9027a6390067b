//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoryRepository, ObjectStorage, OrderRepository, ProductRepository, ProfileCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub profiles: Arc<dyn ProfileCommand>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

/// Dependency bundle for HTTP handlers. Built once at start-up and shared
/// read-only across workers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl HttpState {
    /// Construct state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            profiles,
            categories,
            products,
            orders,
            storage,
        } = ports;
        Self {
            profiles,
            categories,
            products,
            orders,
            storage,
        }
    }
}
