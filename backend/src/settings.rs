//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, a config file, or `STOREFRONT_*` environment
//! variables. Store credentials are optional so the service can start (and
//! answer health checks) before the hosted project is provisioned.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::outbound::backend::BackendConfig;

const DEFAULT_STORAGE_BUCKET: &str = "product-images";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `store_url` is present but not an absolute URL.
    #[error("invalid store_url {value:?}: {source}")]
    InvalidStoreUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind_addr {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime settings for the admin service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct AppSettings {
    /// Base URL of the hosted data service.
    pub store_url: Option<String>,
    /// Service credential sent with every store request.
    pub service_key: Option<String>,
    /// Bucket receiving product image uploads.
    pub storage_bucket: Option<String>,
    /// Per-request timeout for store calls, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("store_url", &self.store_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("storage_bucket", &self.storage_bucket)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl AppSettings {
    /// Return the upload bucket, falling back to the default.
    pub fn storage_bucket(&self) -> &str {
        self.storage_bucket
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_BUCKET)
    }

    /// Return the store request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the listen address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for an unparsable value.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Build the store client configuration.
    ///
    /// Returns `Ok(None)` when either the URL or the key is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidStoreUrl`] when a URL is supplied but
    /// cannot be parsed.
    pub fn backend_config(&self) -> Result<Option<BackendConfig>, SettingsError> {
        let store_url = self.store_url.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let service_key = self
            .service_key
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let (Some(store_url), Some(service_key)) = (store_url, service_key) else {
            return Ok(None);
        };
        let base_url = Url::parse(store_url).map_err(|source| SettingsError::InvalidStoreUrl {
            value: store_url.to_owned(),
            source,
        })?;
        Ok(Some(BackendConfig {
            base_url,
            service_key: Zeroizing::new(service_key.to_owned()),
            timeout: self.request_timeout(),
        }))
    }
}
