//! Namespace mapping service.
//!
//! Implements the [`NamespaceMapper`] driving port on top of the
//! authentication, storage, and creation-policy driven ports. Every operation
//! either returns successfully or fails with exactly one taxonomy [`Error`];
//! collaborator faults that are not attributable to the caller become
//! unclassified faults.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AuthenticationError, Authenticator, NamespaceCreationPolicy, NamespaceMapper,
    NamespaceStore, NamespaceStoreError,
};
use crate::domain::{AuthsourceId, Credential, Error, Namespace, NamespaceId, Token, User};

/// Namespace mapping service implementing the driving port.
#[derive(Clone)]
pub struct IdMapper<A, S, P> {
    authenticator: Arc<A>,
    store: Arc<S>,
    policy: Arc<P>,
}

impl<A, S, P> IdMapper<A, S, P> {
    /// Create a new service from its collaborators.
    pub fn new(authenticator: Arc<A>, store: Arc<S>, policy: Arc<P>) -> Self {
        Self {
            authenticator,
            store,
            policy,
        }
    }
}

impl<A, S, P> IdMapper<A, S, P>
where
    A: Authenticator,
    S: NamespaceStore,
    P: NamespaceCreationPolicy,
{
    fn map_authentication_error(error: AuthenticationError) -> Error {
        match error {
            AuthenticationError::UnknownAuthsource { .. } | AuthenticationError::InvalidToken => {
                Error::invalid_token()
            }
            AuthenticationError::Unavailable { message } => {
                Error::internal(format!("authentication source unavailable: {message}"))
            }
        }
    }

    fn map_store_error(error: NamespaceStoreError) -> Error {
        match error {
            NamespaceStoreError::AlreadyExists { namespace } => Error::namespace_exists(namespace),
            NamespaceStoreError::Connection { message } => {
                Error::internal(format!("namespace store unavailable: {message}"))
            }
            NamespaceStoreError::Query { message } => {
                Error::internal(format!("namespace store error: {message}"))
            }
        }
    }

    async fn authenticate(&self, authsource: &AuthsourceId, token: &Token) -> Result<User, Error> {
        let user = self
            .authenticator
            .authenticate(authsource, token)
            .await
            .map_err(|err| {
                debug!(%authsource, error = %err, "authentication failed");
                Self::map_authentication_error(err)
            })?;

        if user.authsource() != authsource {
            return Err(Error::internal(format!(
                "authsource {authsource} vouched for foreign user {user}"
            )));
        }
        Ok(user)
    }

    async fn fetch(&self, namespace: &NamespaceId) -> Result<Namespace, Error> {
        self.store
            .get(namespace)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::no_such_namespace(namespace))
    }
}

#[async_trait]
impl<A, S, P> NamespaceMapper for IdMapper<A, S, P>
where
    A: Authenticator,
    S: NamespaceStore,
    P: NamespaceCreationPolicy,
{
    async fn get_namespace(
        &self,
        namespace: &NamespaceId,
        credential: Option<Credential>,
    ) -> Result<Namespace, Error> {
        let found = self.fetch(namespace).await?;
        if found.is_publicly_mappable() {
            return Ok(found);
        }

        let credential = Credential::require(credential)?;
        let user = self
            .authenticate(credential.authsource(), credential.token())
            .await?;
        if !found.is_authorized(&user) {
            warn!(%user, %namespace, "read of private namespace refused");
            return Err(Error::unauthorized(format!(
                "User {user} may not read namespace {namespace}"
            )));
        }
        Ok(found)
    }

    async fn create_namespace(
        &self,
        authsource: &AuthsourceId,
        token: &Token,
        namespace: &NamespaceId,
    ) -> Result<(), Error> {
        let creator = self.authenticate(authsource, token).await?;
        if !self.policy.can_create_namespace(&creator) {
            warn!(user = %creator, %namespace, "namespace creation refused");
            return Err(Error::unauthorized(format!(
                "User {creator} may not create namespaces"
            )));
        }

        let created = Namespace::created_by(namespace.clone(), creator.clone());
        self.store
            .create(&created)
            .await
            .map_err(Self::map_store_error)?;
        info!(user = %creator, %namespace, "namespace created");
        Ok(())
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
