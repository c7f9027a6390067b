//! Adapters for the hosted data service: table API repositories and the
//! product image bucket, sharing one authenticated [`BackendClient`].

mod client;
mod dto;
mod object_storage;
mod repositories;
mod unconfigured;

pub use client::{BackendClient, BackendClientError, BackendConfig, UNIQUE_VIOLATION_CODE};
pub use object_storage::RestObjectStorage;
pub use repositories::{
    RestCategoryRepository, RestOrderRepository, RestProductRepository, RestProfileRepository,
};
pub use unconfigured::UnconfiguredBackend;
