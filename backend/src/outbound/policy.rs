//! Namespace-creation allow list keyed by authsource.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::ports::NamespaceCreationPolicy;
use crate::domain::{AuthsourceId, User};

/// Grants namespace-creation authority to every user of the listed
/// authsources.
#[derive(Debug, Clone, Default)]
pub struct AuthsourceAllowList {
    authsources: BTreeSet<AuthsourceId>,
}

impl AuthsourceAllowList {
    /// Build an allow list from authsource ids.
    pub fn new(authsources: impl IntoIterator<Item = AuthsourceId>) -> Self {
        Self {
            authsources: authsources.into_iter().collect(),
        }
    }

    /// Authsources whose users may create namespaces.
    pub fn authsources(&self) -> impl Iterator<Item = &AuthsourceId> {
        self.authsources.iter()
    }
}

impl NamespaceCreationPolicy for AuthsourceAllowList {
    fn can_create_namespace(&self, user: &User) -> bool {
        let allowed = self.authsources.contains(user.authsource());
        debug!(%user, allowed, "namespace creation authority checked");
        allowed
    }
}
