//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod namespace_creation_policy;
mod namespace_mapper;
mod namespace_store;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{AuthenticationError, Authenticator};
#[cfg(test)]
pub use namespace_creation_policy::MockNamespaceCreationPolicy;
pub use namespace_creation_policy::NamespaceCreationPolicy;
#[cfg(test)]
pub use namespace_mapper::MockNamespaceMapper;
pub use namespace_mapper::NamespaceMapper;
#[cfg(test)]
pub use namespace_store::MockNamespaceStore;
pub use namespace_store::{NamespaceStore, NamespaceStoreError};
