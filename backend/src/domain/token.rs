//! Opaque bearer tokens presented by callers.

use std::fmt;

use zeroize::Zeroizing;

use super::{ParameterError, StringRule, Validator};

/// Maximum length of a [`Token`].
pub const TOKEN_MAX_LENGTH: usize = 1000;

/// Secret token issued by an authsource.
///
/// ## Invariants
/// - Non-blank and at most [`TOKEN_MAX_LENGTH`] characters; no character
///   restrictions otherwise.
/// - Never rendered: `Debug` is redacted and there is no `Display`.
/// - Backing memory is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(Zeroizing<String>);

impl Token {
    /// Name used in validation errors.
    pub const PARAMETER: &'static str = "token";

    const RULE: StringRule = StringRule::present().max_length(TOKEN_MAX_LENGTH);

    /// Validate and construct a token.
    pub fn new(validator: &Validator, token: impl Into<String>) -> Result<Self, ParameterError> {
        let token = Zeroizing::new(token.into());
        validator
            .require_valid_string(&token, Self::PARAMETER, Self::RULE)
            .map_err(redact)?;
        Ok(Self(token))
    }

    /// Expose the secret for authsource lookups.
    pub fn expose_secret(&self) -> &str {
        self.0.as_str()
    }
}

// Over-length failures would otherwise echo the token back to the caller.
fn redact(error: ParameterError) -> ParameterError {
    match error {
        ParameterError::TooLong { name, max, .. } => ParameterError::TooLong {
            name,
            value: "(redacted)".to_owned(),
            max,
        },
        other => other,
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(**redacted**)")
    }
}
