//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports return typed errors ([`StoreError`] for table access,
//! [`ObjectStorageError`] for the bucket) so adapters classify failures once
//! and the domain maps them to API errors in one place.

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod object_storage;
mod order_repository;
mod product_repository;
mod profile_command;
mod profile_repository;
mod store_error;

pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{ObjectStorage, ObjectStorageError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::OrderRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::ProductRepository;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::ProfileRepository;
pub use store_error::StoreError;
