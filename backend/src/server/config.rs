//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use storefront_admin::outbound::backend::BackendConfig;
use storefront_admin::settings::{AppSettings, SettingsError};

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: Option<BackendConfig>,
    pub(crate) storage_bucket: String,
}

impl ServerConfig {
    /// Resolve loaded settings into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the listen address or store URL cannot
    /// be parsed.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            backend: settings.backend_config()?,
            storage_bucket: settings.storage_bucket().to_owned(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
