//! Driven port deciding who may create namespaces.

use crate::domain::User;

/// Creation authority check, consulted after authentication succeeds.
#[cfg_attr(test, mockall::automock)]
pub trait NamespaceCreationPolicy: Send + Sync {
    /// `true` when `user` may create new namespaces.
    fn can_create_namespace(&self, user: &User) -> bool;
}
