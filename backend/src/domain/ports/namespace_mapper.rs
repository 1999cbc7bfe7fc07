//! Driving port for namespace use-cases.
//!
//! Inbound adapters call this port with already-parsed request values and
//! receive domain errors; they never see the store or the authsources.

use async_trait::async_trait;

use crate::domain::{AuthsourceId, Credential, Error, Namespace, NamespaceId, Token};

/// Domain use-case port for namespace reads and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamespaceMapper: Send + Sync {
    /// Fetch a namespace, authenticating only when it is private.
    async fn get_namespace(
        &self,
        namespace: &NamespaceId,
        credential: Option<Credential>,
    ) -> Result<Namespace, Error>;

    /// Create a private namespace owned by the authenticated caller.
    async fn create_namespace(
        &self,
        authsource: &AuthsourceId,
        token: &Token,
        namespace: &NamespaceId,
    ) -> Result<(), Error>;
}
