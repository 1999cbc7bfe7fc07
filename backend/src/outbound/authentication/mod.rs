//! Authsource adapters.
//!
//! [`AuthsourceRegistry`] is the [`Authenticator`] handed to the domain; it
//! routes each lookup to the backend registered for the credential's
//! authsource.

mod local;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AuthenticationError, Authenticator};
use crate::domain::{AuthsourceId, Token, User};

pub use local::{LocalTokenAuthenticator, LocalUsersError, token_digest};

/// Dispatches authentication to per-authsource backends.
#[derive(Clone, Default)]
pub struct AuthsourceRegistry {
    backends: HashMap<AuthsourceId, Arc<dyn Authenticator>>,
}

impl AuthsourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `backend` for `authsource`, replacing any previous backend.
    #[must_use]
    pub fn with_backend(mut self, authsource: AuthsourceId, backend: Arc<dyn Authenticator>) -> Self {
        self.backends.insert(authsource, backend);
        self
    }

    /// `true` when a backend serves `authsource`.
    pub fn serves(&self, authsource: &AuthsourceId) -> bool {
        self.backends.contains_key(authsource)
    }
}

#[async_trait]
impl Authenticator for AuthsourceRegistry {
    async fn authenticate(
        &self,
        authsource: &AuthsourceId,
        token: &Token,
    ) -> Result<User, AuthenticationError> {
        let backend = self
            .backends
            .get(authsource)
            .ok_or_else(|| AuthenticationError::unknown_authsource(authsource.as_ref()))?;
        backend.authenticate(authsource, token).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockAuthenticator;
    use crate::domain::Validator;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn routes_to_the_registered_backend() {
        let validator = Validator::default();
        let kbase = AuthsourceId::new(&validator, "kbase").expect("valid authsource");
        let user = User::try_from_strings(&validator, "kbase", "ada").expect("valid user");
        let expected = user.clone();

        let mut backend = MockAuthenticator::new();
        backend
            .expect_authenticate()
            .times(1)
            .return_once(move |_, _| Ok(user));
        let registry = AuthsourceRegistry::new().with_backend(kbase.clone(), Arc::new(backend));

        let token = Token::new(&validator, "tokey").expect("valid token");
        let found = registry
            .authenticate(&kbase, &token)
            .await
            .expect("authenticated");
        assert_eq!(found, expected);
        assert!(registry.serves(&kbase));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_authsources_are_reported() {
        let validator = Validator::default();
        let registry = AuthsourceRegistry::new();
        let other = AuthsourceId::new(&validator, "other").expect("valid authsource");
        let token = Token::new(&validator, "tokey").expect("valid token");

        let err = registry
            .authenticate(&other, &token)
            .await
            .expect_err("unknown");
        assert_eq!(err, AuthenticationError::unknown_authsource("other"));
    }
}
