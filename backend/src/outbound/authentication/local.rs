//! Token table for the built-in `local` authsource.
//!
//! Tokens are never stored: the table maps the lowercase hex SHA-256 digest
//! of each token to the username that owns it. The on-disk form is a JSON
//! object of `username -> digest`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{AuthenticationError, Authenticator};
use crate::domain::{AuthsourceId, ParameterError, Token, User, Username, Validator};

/// Hex-encoded SHA-256 digest of a token.
///
/// # Examples
/// ```
/// use idmapping::domain::{Token, Validator};
/// use idmapping::outbound::authentication::token_digest;
///
/// let token = Token::new(&Validator::default(), "abc").expect("valid token");
/// assert_eq!(
///     token_digest(&token),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn token_digest(token: &Token) -> String {
    hex::encode(Sha256::digest(token.expose_secret().as_bytes()))
}

/// Failures loading the local users table.
#[derive(Debug, Error)]
pub enum LocalUsersError {
    /// The file could not be read.
    #[error("failed to read local users file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON object of strings.
    #[error("failed to parse local users file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A key is not a legal username.
    #[error("invalid local user: {0}")]
    Username(#[from] ParameterError),
    /// A value is not a SHA-256 hex digest.
    #[error("token digest for local user {username} is not 64 hex characters")]
    Digest { username: String },
    /// Two users share one token digest.
    #[error("local users {first} and {second} share a token")]
    SharedToken { first: String, second: String },
}

/// [`Authenticator`] backed by an in-memory digest table.
#[derive(Debug, Clone)]
pub struct LocalTokenAuthenticator {
    authsource: AuthsourceId,
    users_by_digest: HashMap<String, Username>,
}

impl LocalTokenAuthenticator {
    /// Build from `(username, token digest)` pairs.
    pub fn from_digests<I, U, D>(validator: &Validator, entries: I) -> Result<Self, LocalUsersError>
    where
        I: IntoIterator<Item = (U, D)>,
        U: Into<String>,
        D: Into<String>,
    {
        let authsource = AuthsourceId::new(validator, AuthsourceId::LOCAL)?;
        let mut users_by_digest = HashMap::new();
        for (username, digest) in entries {
            let username = Username::new(validator, username)?;
            let digest = digest.into().to_ascii_lowercase();
            if digest.len() != 64 || hex::decode(&digest).is_err() {
                return Err(LocalUsersError::Digest {
                    username: username.into(),
                });
            }
            if let Some(previous) = users_by_digest.insert(digest, username.clone()) {
                return Err(LocalUsersError::SharedToken {
                    first: previous.into(),
                    second: username.into(),
                });
            }
        }
        Ok(Self {
            authsource,
            users_by_digest,
        })
    }

    /// Load the table from a JSON file.
    pub fn from_file(validator: &Validator, path: &Path) -> Result<Self, LocalUsersError> {
        let raw = fs::read_to_string(path).map_err(|source| LocalUsersError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| LocalUsersError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let authenticator = Self::from_digests(validator, entries)?;
        info!(
            path = %path.display(),
            users = authenticator.len(),
            "loaded local users"
        );
        Ok(authenticator)
    }

    /// Authsource this table answers for.
    pub fn authsource(&self) -> &AuthsourceId {
        &self.authsource
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users_by_digest.len()
    }

    /// `true` when no users are known.
    pub fn is_empty(&self) -> bool {
        self.users_by_digest.is_empty()
    }
}

#[async_trait]
impl Authenticator for LocalTokenAuthenticator {
    async fn authenticate(
        &self,
        authsource: &AuthsourceId,
        token: &Token,
    ) -> Result<User, AuthenticationError> {
        if authsource != &self.authsource {
            return Err(AuthenticationError::unknown_authsource(authsource.as_ref()));
        }
        self.users_by_digest
            .get(&token_digest(token))
            .map(|username| User::new(self.authsource.clone(), username.clone()))
            .ok_or_else(AuthenticationError::invalid_token)
    }
}
