//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **backend**: reqwest adapters over the hosted table and storage APIs,
//!   plus a stand-in used when no credentials are configured.
//!
//! Adapters translate between domain types and wire representations. They
//! contain no business logic.

pub mod backend;
