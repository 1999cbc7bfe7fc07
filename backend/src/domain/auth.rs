//! Authentication primitives: the credential a caller presents.
//!
//! Keep header extraction outside the domain; adapters hand over the raw
//! header value and [`Credential::parse`] classifies every malformed shape.

use super::{AuthsourceId, Error, Token, Validator};

/// Message used when a credential header does not hold exactly two parts.
pub const MALFORMED_CREDENTIAL_MESSAGE: &str = "Expected authsource and token in header.";

/// Validated `(authsource, token)` pair.
///
/// # Examples
/// ```
/// use idmapping::domain::{Credential, Validator};
///
/// let validator = Validator::default();
/// let credential = Credential::parse(&validator, Some("as toketoketoke"))
///     .unwrap()
///     .expect("header present");
/// assert_eq!(credential.authsource().as_ref(), "as");
/// assert_eq!(credential.token().expose_secret(), "toketoketoke");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    authsource: AuthsourceId,
    token: Token,
}

impl Credential {
    /// Build a credential from validated parts.
    pub fn new(authsource: AuthsourceId, token: Token) -> Self {
        Self { authsource, token }
    }

    /// Parse an optional `"<authsource> <token>"` header value.
    ///
    /// An absent or empty header means an anonymous caller and yields
    /// `Ok(None)`. Any other value must split into exactly two
    /// whitespace-separated parts; anything else is an illegal parameter.
    pub fn parse(validator: &Validator, header: Option<&str>) -> Result<Option<Self>, Error> {
        let Some(raw) = header.filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };

        let mut parts = raw.split_whitespace();
        let (Some(authsource), Some(token), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::illegal_parameter(MALFORMED_CREDENTIAL_MESSAGE));
        };

        let authsource = AuthsourceId::new(validator, authsource)?;
        let token = Token::new(validator, token)?;
        Ok(Some(Self::new(authsource, token)))
    }

    /// Require a credential for an operation that cannot run anonymously.
    pub fn require(credential: Option<Self>) -> Result<Self, Error> {
        credential.ok_or_else(Error::no_token)
    }

    /// Authsource that should vouch for the token.
    pub fn authsource(&self) -> &AuthsourceId {
        &self.authsource
    }

    /// Secret token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Split into owned parts.
    pub fn into_parts(self) -> (AuthsourceId, Token) {
        (self.authsource, self.token)
    }
}
