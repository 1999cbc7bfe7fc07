//! Driven port resolving a token into the user it belongs to.
use async_trait::async_trait;

use crate::domain::{AuthsourceId, Token, User};

use super::define_port_error;

define_port_error! {
    /// Failures raised by authenticator adapters.
    pub enum AuthenticationError {
        /// No backend is registered for the authsource.
        UnknownAuthsource { authsource: String } => "unknown authsource {authsource}",
        /// The authsource does not recognise the token.
        InvalidToken => "token rejected by authsource",
        /// The authsource could not be reached or answered nonsense.
        Unavailable { message: String } => "authsource unavailable: {message}",
    }
}

/// Resolves `(authsource, token)` pairs into users.
///
/// A successful answer always names a user whose authsource equals the one
/// queried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Look up the user owning `token` within `authsource`.
    async fn authenticate(
        &self,
        authsource: &AuthsourceId,
        token: &Token,
    ) -> Result<User, AuthenticationError>;
}
