//! Reusable precondition checks for string inputs.
//!
//! Every validated identifier funnels through [`Validator`], which fails fast
//! with a typed [`ParameterError`] naming the parameter and, where relevant,
//! the offending value, limit, or character.
//!
//! Legal character classes are regex bracket contents such as `a-z0-9_`. Each
//! class is compiled once into a negated pattern and kept in a
//! [`PatternCache`]. The cache is an explicit object: construct one at
//! start-up and share it (via [`Validator`]) with everything that validates.

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;

/// Typed validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// The value was absent, empty, or whitespace only.
    #[error("missing {name}")]
    Missing { name: String },
    /// The value has more characters than allowed.
    #[error("{name} {value} exceeds maximum length of {max}")]
    TooLong {
        name: String,
        value: String,
        max: usize,
    },
    /// The value contains a character outside the legal class.
    #[error("Illegal character in {name} {value}: {character}")]
    IllegalCharacter {
        name: String,
        value: String,
        character: char,
    },
    /// The configured legal character class does not compile.
    #[error("invalid legal character class {class}: {message}")]
    InvalidCharacterClass { class: String, message: String },
}

/// Constraints applied by [`Validator::require_valid_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringRule {
    legal_characters: Option<&'static str>,
    max_length: Option<usize>,
}

impl StringRule {
    /// Rule that only requires a non-blank value.
    pub const fn present() -> Self {
        Self {
            legal_characters: None,
            max_length: None,
        }
    }

    /// Restrict the value to the given regex character class contents.
    pub const fn legal_characters(mut self, class: &'static str) -> Self {
        self.legal_characters = Some(class);
        self
    }

    /// Restrict the value to at most `max` characters.
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Process-wide cache of compiled character-class patterns.
///
/// Entries are only ever added; an existing entry is never replaced, so
/// concurrent readers always observe a fully compiled pattern.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Regex>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compiled classes held.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// `true` when no class has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the first character of `value` outside `class`, if any.
    fn first_illegal(&self, class: &str, value: &str) -> Result<Option<char>, ParameterError> {
        if let Some(pattern) = self.patterns.get(class) {
            return Ok(first_match(pattern.value(), value));
        }

        let pattern = Regex::new(&format!("[^{class}]")).map_err(|err| {
            ParameterError::InvalidCharacterClass {
                class: class.to_owned(),
                message: err.to_string(),
            }
        })?;
        let found = first_match(&pattern, value);
        self.patterns.entry(class.to_owned()).or_insert(pattern);
        Ok(found)
    }
}

fn first_match(pattern: &Regex, value: &str) -> Option<char> {
    pattern
        .find(value)
        .and_then(|found| found.as_str().chars().next())
}

/// Validation entry point sharing a [`PatternCache`].
///
/// Cloning is cheap; all clones share the same cache.
///
/// # Examples
/// ```
/// use idmapping::domain::{ParameterError, StringRule, Validator};
///
/// let validator = Validator::default();
/// let rule = StringRule::present().legal_characters("a-z").max_length(5);
/// assert!(validator.require_valid_string("abc", "thing", rule).is_ok());
/// assert!(matches!(
///     validator.require_valid_string("a&c", "thing", rule),
///     Err(ParameterError::IllegalCharacter { character: '&', .. })
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    cache: Arc<PatternCache>,
}

impl Validator {
    /// Build a validator over an existing cache.
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }

    /// Shared pattern cache.
    pub fn cache(&self) -> &Arc<PatternCache> {
        &self.cache
    }

    /// Fail with [`ParameterError::Missing`] when `value` is absent or blank.
    pub fn require_present<'a>(
        value: Option<&'a str>,
        name: &str,
    ) -> Result<&'a str, ParameterError> {
        match value {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ParameterError::Missing {
                name: name.to_owned(),
            }),
        }
    }

    /// Check presence, then length, then legal characters.
    pub fn require_valid_string(
        &self,
        value: &str,
        name: &str,
        rule: StringRule,
    ) -> Result<(), ParameterError> {
        Self::require_present(Some(value), name)?;

        if let Some(max) = rule.max_length {
            if value.chars().count() > max {
                return Err(ParameterError::TooLong {
                    name: name.to_owned(),
                    value: value.to_owned(),
                    max,
                });
            }
        }

        let Some(class) = rule.legal_characters else {
            return Ok(());
        };
        match self.cache.first_illegal(class, value)? {
            Some(character) => Err(ParameterError::IllegalCharacter {
                name: name.to_owned(),
                value: value.to_owned(),
                character,
            }),
            None => Ok(()),
        }
    }
}
