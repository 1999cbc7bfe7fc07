//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use idmapping::domain::AuthsourceId;
use idmapping::settings::{Settings, SettingsError};
use idmapping::domain::Validator;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) creator_authsources: Vec<AuthsourceId>,
    pub(crate) local_users_file: Option<PathBuf>,
    pub(crate) swagger_ui: bool,
}

impl ServerConfig {
    /// Resolve raw settings into typed server configuration.
    pub fn from_settings(settings: &Settings, validator: &Validator) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            creator_authsources: settings.creator_authsources(validator)?,
            local_users_file: settings.local_users_file().cloned(),
            swagger_ui: settings.swagger_ui,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
