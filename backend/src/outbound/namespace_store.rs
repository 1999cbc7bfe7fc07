//! In-memory implementation of the namespace store.
//!
//! Namespaces live in a `HashMap` guarded by `tokio::sync::RwLock`. Reads
//! share the lock; creation holds the write lock across the existence check
//! and the insert, so concurrent creates for one id resolve to exactly one
//! winner. State is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{NamespaceStore, NamespaceStoreError};
use crate::domain::{Namespace, NamespaceId};

/// Process-local namespace store.
#[derive(Debug, Default)]
pub struct InMemoryNamespaceStore {
    namespaces: RwLock<HashMap<NamespaceId, Namespace>>,
}

impl InMemoryNamespaceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `namespaces`.
    ///
    /// Later entries replace earlier ones sharing an id.
    pub fn with_namespaces(namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        let namespaces = namespaces
            .into_iter()
            .map(|namespace| (namespace.id().clone(), namespace))
            .collect();
        Self {
            namespaces: RwLock::new(namespaces),
        }
    }

    /// Number of stored namespaces.
    pub async fn len(&self) -> usize {
        self.namespaces.read().await.len()
    }

    /// `true` when no namespace is stored.
    pub async fn is_empty(&self) -> bool {
        self.namespaces.read().await.is_empty()
    }
}

#[async_trait]
impl NamespaceStore for InMemoryNamespaceStore {
    async fn get(&self, id: &NamespaceId) -> Result<Option<Namespace>, NamespaceStoreError> {
        Ok(self.namespaces.read().await.get(id).cloned())
    }

    async fn create(&self, namespace: &Namespace) -> Result<(), NamespaceStoreError> {
        let mut guard = self.namespaces.write().await;
        if guard.contains_key(namespace.id()) {
            return Err(NamespaceStoreError::already_exists(namespace.id().as_ref()));
        }
        guard.insert(namespace.id().clone(), namespace.clone());
        debug!(namespace = %namespace.id(), "namespace stored");
        Ok(())
    }
}
