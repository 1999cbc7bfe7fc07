//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `IDMAPPING_*` environment variables, and an
//! optional configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AuthsourceId, ParameterError, Validator};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CREATOR_AUTHSOURCES: &str = "local";

/// Failures turning raw settings into typed values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A creator authsource is not a legal authsource id.
    #[error("invalid creator authsource: {0}")]
    CreatorAuthsource(#[from] ParameterError),
}

/// Configuration values for the namespace mapping service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDMAPPING")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Comma-separated authsources whose users may create namespaces.
    pub creator_authsources: Option<String>,
    /// JSON file mapping local usernames to SHA-256 token digests.
    pub local_users_file: Option<PathBuf>,
    /// Serve Swagger UI at `/docs`.
    #[ortho_config(default = false)]
    pub swagger_ui: bool,
}

impl Settings {
    /// Configured bind address, falling back to all interfaces on 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Authsources granted namespace-creation authority, falling back to
    /// `local`. Blank entries are skipped.
    pub fn creator_authsources(
        &self,
        validator: &Validator,
    ) -> Result<Vec<AuthsourceId>, SettingsError> {
        self.creator_authsources
            .as_deref()
            .unwrap_or(DEFAULT_CREATOR_AUTHSOURCES)
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| AuthsourceId::new(validator, entry).map_err(SettingsError::from))
            .collect()
    }

    /// Path of the local users table, if configured.
    pub fn local_users_file(&self) -> Option<&PathBuf> {
        self.local_users_file.as_ref()
    }
}
