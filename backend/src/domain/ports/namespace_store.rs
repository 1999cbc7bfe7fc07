//! Port abstraction for namespace persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Namespace, NamespaceId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by namespace store adapters.
    pub enum NamespaceStoreError {
        /// A namespace with this id is already stored.
        AlreadyExists { namespace: String } => "namespace {namespace} already exists",
        /// Store connection could not be established.
        Connection { message: String } => "namespace store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "namespace store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NamespaceStore: Send + Sync {
    /// Fetch a namespace by identifier.
    async fn get(&self, id: &NamespaceId) -> Result<Option<Namespace>, NamespaceStoreError>;

    /// Persist a new namespace.
    ///
    /// Creation is atomic: of two concurrent creates for the same id exactly
    /// one succeeds and the other fails with
    /// [`NamespaceStoreError::AlreadyExists`].
    async fn create(&self, namespace: &Namespace) -> Result<(), NamespaceStoreError>;
}
