//! Failure type shared by every port backed by the hosted data service.

use thiserror::Error;

/// Errors raised by table-backed repository adapters.
///
/// Adapters classify failures using the store's structured error code, so
/// callers can branch on [`StoreError::UniqueViolation`] without inspecting
/// message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No credential or base URL was configured for the backing service.
    #[error("backing store is not configured")]
    NotConfigured,
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("backing store connection failed: {message}")]
    Connection { message: String },
    /// An insert collided with an existing primary key or unique column.
    #[error("unique constraint violated: {message}")]
    UniqueViolation { message: String },
    /// The store answered with any other error.
    #[error("backing store rejected the request: {message}")]
    Rejected {
        code: Option<String>,
        message: String,
        details: Option<String>,
    },
    /// The store answered successfully but the body could not be decoded.
    #[error("backing store response could not be decoded: {message}")]
    Decode { message: String },
}

impl StoreError {
    /// Convenience constructor for [`StoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`StoreError::UniqueViolation`].
    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`StoreError::Rejected`] without a code or details.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            code: None,
            message: message.into(),
            details: None,
        }
    }

    /// Convenience constructor for [`StoreError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
