//! Domain primitives, aggregates, and services for namespace mapping.
//!
//! Purpose: Define strongly typed, pre-validated values (authsources, users,
//! tokens, namespaces), the closed error taxonomy, and the mapping service.
//! Nothing here knows about HTTP or storage technology.
//!
//! Public surface:
//! - Error / ErrorKind / ErrorClass: taxonomy translated by inbound adapters.
//! - Validator / StringRule / ParameterError: shared string validation.
//! - AuthsourceId / Username / User / Token: identity values.
//! - Credential: parsed `authsource token` header.
//! - NamespaceId / Namespace: the namespace aggregate.
//! - IdMapper: the [`ports::NamespaceMapper`] implementation.

pub mod auth;
pub mod error;
pub mod mapper;
pub mod namespace;
pub mod ports;
pub mod token;
pub mod user;
pub mod validation;

pub use self::auth::{Credential, MALFORMED_CREDENTIAL_MESSAGE};
pub use self::error::{Error, ErrorClass, ErrorKind};
pub use self::mapper::IdMapper;
pub use self::namespace::{NAMESPACE_ID_CHARACTERS, NAMESPACE_ID_MAX_LENGTH, Namespace, NamespaceId};
pub use self::token::{TOKEN_MAX_LENGTH, Token};
pub use self::user::{
    AUTHSOURCE_ID_CHARACTERS, AUTHSOURCE_ID_MAX_LENGTH, AuthsourceId, USERNAME_CHARACTERS,
    USERNAME_MAX_LENGTH, User, Username,
};
pub use self::validation::{ParameterError, PatternCache, StringRule, Validator};

/// Result alias for domain operations.
///
/// # Examples
/// ```
/// use idmapping::domain::{DomainResult, Error};
///
/// fn refuse() -> DomainResult<()> {
///     Err(Error::unauthorized("nope"))
/// }
/// assert_eq!(refuse().unwrap_err().message(), "20000 Unauthorized: nope");
/// ```
pub type DomainResult<T> = Result<T, Error>;
