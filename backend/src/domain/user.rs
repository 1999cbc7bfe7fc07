//! Identity value types: authentication sources, usernames, and users.
//!
//! Both identifiers wrap strings but are distinct types; an authsource id is
//! never accepted where a username is expected. Construction always runs the
//! shared [`Validator`], so every instance in memory is already valid.

use std::fmt;

use super::{ParameterError, StringRule, Validator};

/// Legal characters for an [`AuthsourceId`].
pub const AUTHSOURCE_ID_CHARACTERS: &str = "a-z";
/// Maximum length of an [`AuthsourceId`].
pub const AUTHSOURCE_ID_MAX_LENGTH: usize = 20;
/// Legal characters for a [`Username`].
pub const USERNAME_CHARACTERS: &str = "a-z0-9_";
/// Maximum length of a [`Username`].
pub const USERNAME_MAX_LENGTH: usize = 100;

/// Identifier of an authentication backend, e.g. `local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthsourceId(String);

impl AuthsourceId {
    /// Name used in validation errors.
    pub const PARAMETER: &'static str = "authsource id";
    /// Authsource served by the built-in token lookup.
    pub const LOCAL: &'static str = "local";

    const RULE: StringRule = StringRule::present()
        .legal_characters(AUTHSOURCE_ID_CHARACTERS)
        .max_length(AUTHSOURCE_ID_MAX_LENGTH);

    /// Validate and construct an authsource id.
    ///
    /// # Examples
    /// ```
    /// use idmapping::domain::{AuthsourceId, Validator};
    ///
    /// let validator = Validator::default();
    /// assert!(AuthsourceId::new(&validator, "local").is_ok());
    /// assert!(AuthsourceId::new(&validator, "Local").is_err());
    /// ```
    pub fn new(validator: &Validator, id: impl Into<String>) -> Result<Self, ParameterError> {
        let id = id.into();
        validator.require_valid_string(&id, Self::PARAMETER, Self::RULE)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for AuthsourceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AuthsourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AuthsourceId> for String {
    fn from(value: AuthsourceId) -> Self {
        value.0
    }
}

/// Name of a principal within one authsource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Name used in validation errors.
    pub const PARAMETER: &'static str = "user name";

    const RULE: StringRule = StringRule::present()
        .legal_characters(USERNAME_CHARACTERS)
        .max_length(USERNAME_MAX_LENGTH);

    /// Validate and construct a username.
    pub fn new(validator: &Validator, name: impl Into<String>) -> Result<Self, ParameterError> {
        let name = name.into();
        validator.require_valid_string(&name, Self::PARAMETER, Self::RULE)?;
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// A principal: a username qualified by the authsource that vouches for it.
///
/// ## Invariants
/// - Ordering is by authsource, then username.
/// - Renders as `authsource/username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct User {
    authsource: AuthsourceId,
    username: Username,
}

impl User {
    /// Build a user from validated components.
    pub fn new(authsource: AuthsourceId, username: Username) -> Self {
        Self {
            authsource,
            username,
        }
    }

    /// Fallible constructor validating both components.
    pub fn try_from_strings(
        validator: &Validator,
        authsource: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, ParameterError> {
        let authsource = AuthsourceId::new(validator, authsource)?;
        let username = Username::new(validator, username)?;
        Ok(Self::new(authsource, username))
    }

    /// Authsource that authenticated this user.
    pub fn authsource(&self) -> &AuthsourceId {
        &self.authsource
    }

    /// Username within the authsource.
    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.authsource, self.username)
    }
}
