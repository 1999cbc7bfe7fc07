//! Domain-level error taxonomy.
//!
//! These errors are transport agnostic. Every classified kind carries a stable
//! application code, a short application error label, and an HTTP-style status
//! number; inbound adapters turn them into protocol-specific envelopes.
//!
//! Anything outside the closed taxonomy is an unclassified fault
//! ([`ErrorKind::Internal`]). Faults carry their raw message and have neither
//! an application code nor an application error label.

use std::fmt;

use super::ParameterError;

/// Broad family an [`ErrorKind`] belongs to.
///
/// Families split caller faults (bad credentials, forbidden, bad input,
/// conflicts, missing data) from server faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller could not be authenticated.
    Authentication,
    /// The caller is authenticated but not permitted.
    Authorization,
    /// The caller supplied missing or malformed input.
    Input,
    /// The request collides with existing state.
    Conflict,
    /// The requested data does not exist.
    NoData,
    /// The server failed; not attributable to the caller.
    Internal,
}

/// Closed set of error kinds surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Authentication failed for a reason other than the token itself.
    AuthenticationFailed,
    /// An operation required a credential and none was supplied.
    NoToken,
    /// The supplied credential was rejected.
    InvalidToken,
    /// The caller may not perform the operation.
    Unauthorized,
    /// A required input parameter was absent or blank.
    MissingParameter,
    /// An input parameter was present but malformed.
    IllegalParameter,
    /// A namespace with the requested id already exists.
    NamespaceExists,
    /// Generic missing data.
    NoData,
    /// The requested namespace does not exist.
    NoSuchNamespace,
    /// Unclassified fault.
    Internal,
}

impl ErrorKind {
    /// Stable numeric application code, absent for unclassified faults.
    pub const fn app_code(self) -> Option<u32> {
        match self {
            Self::AuthenticationFailed => Some(10000),
            Self::NoToken => Some(10010),
            Self::InvalidToken => Some(10020),
            Self::Unauthorized => Some(20000),
            Self::MissingParameter => Some(30000),
            Self::IllegalParameter => Some(30001),
            Self::NamespaceExists => Some(40000),
            Self::NoData => Some(50000),
            Self::NoSuchNamespace => Some(50010),
            Self::Internal => None,
        }
    }

    /// Short application error label, absent for unclassified faults.
    pub const fn app_error(self) -> Option<&'static str> {
        match self {
            Self::AuthenticationFailed => Some("Authentication failed"),
            Self::NoToken => Some("No authentication token"),
            Self::InvalidToken => Some("Invalid token"),
            Self::Unauthorized => Some("Unauthorized"),
            Self::MissingParameter => Some("Missing input parameter"),
            Self::IllegalParameter => Some("Illegal input parameter"),
            Self::NamespaceExists => Some("Namespace already exists"),
            Self::NoData => Some("No data"),
            Self::NoSuchNamespace => Some("No such namespace"),
            Self::Internal => None,
        }
    }

    /// Family this kind belongs to.
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::AuthenticationFailed | Self::NoToken | Self::InvalidToken => {
                ErrorClass::Authentication
            }
            Self::Unauthorized => ErrorClass::Authorization,
            Self::MissingParameter | Self::IllegalParameter => ErrorClass::Input,
            Self::NamespaceExists => ErrorClass::Conflict,
            Self::NoData | Self::NoSuchNamespace => ErrorClass::NoData,
            Self::Internal => ErrorClass::Internal,
        }
    }

    /// HTTP-style status number for this kind.
    pub const fn status(self) -> u16 {
        match self.class() {
            ErrorClass::Authentication => 401,
            ErrorClass::Authorization => 403,
            ErrorClass::Input => 400,
            ErrorClass::Conflict => 409,
            ErrorClass::NoData => 404,
            ErrorClass::Internal => 500,
        }
    }

    /// `true` when the caller, rather than the server, is at fault.
    pub const fn is_caller_fault(self) -> bool {
        !matches!(self.class(), ErrorClass::Internal)
    }
}

/// Domain error: a kind from the closed taxonomy plus optional detail.
///
/// ## Invariants
/// - `detail`, when present, is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use idmapping::domain::{Error, ErrorKind};
///
/// let err = Error::no_such_namespace("foo");
/// assert_eq!(err.kind(), ErrorKind::NoSuchNamespace);
/// assert_eq!(err.message(), "50010 No such namespace: foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    detail: Option<String>,
}

impl Error {
    /// Build an error of `kind`, dropping blank detail text.
    pub fn new(kind: ErrorKind, detail: Option<String>) -> Self {
        let detail = detail.filter(|text| !text.trim().is_empty());
        Self { kind, detail }
    }

    fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self::new(kind, Some(detail.into()))
    }

    /// Convenience constructor for [`ErrorKind::AuthenticationFailed`].
    pub fn authentication_failed(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::AuthenticationFailed, detail)
    }

    /// Convenience constructor for [`ErrorKind::NoToken`].
    pub fn no_token() -> Self {
        Self::new(ErrorKind::NoToken, None)
    }

    /// Convenience constructor for [`ErrorKind::InvalidToken`].
    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, None)
    }

    /// Convenience constructor for [`ErrorKind::Unauthorized`].
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::Unauthorized, detail)
    }

    /// Convenience constructor for [`ErrorKind::MissingParameter`].
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::MissingParameter, name)
    }

    /// Convenience constructor for [`ErrorKind::IllegalParameter`].
    pub fn illegal_parameter(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::IllegalParameter, detail)
    }

    /// Convenience constructor for [`ErrorKind::NamespaceExists`].
    pub fn namespace_exists(namespace: impl fmt::Display) -> Self {
        Self::with_detail(ErrorKind::NamespaceExists, namespace.to_string())
    }

    /// Convenience constructor for [`ErrorKind::NoData`].
    pub fn no_data(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorKind::NoData, detail)
    }

    /// Convenience constructor for [`ErrorKind::NoSuchNamespace`].
    pub fn no_such_namespace(namespace: impl fmt::Display) -> Self {
        Self::with_detail(ErrorKind::NoSuchNamespace, namespace.to_string())
    }

    /// Unclassified fault carrying `message` verbatim.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            detail: Some(message.into()),
        }
    }

    /// Kind from the closed taxonomy.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Detail text attached to the error, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Stable application code; `None` for unclassified faults.
    pub fn app_code(&self) -> Option<u32> {
        self.kind.app_code()
    }

    /// Application error label; `None` for unclassified faults.
    pub fn app_error(&self) -> Option<&'static str> {
        self.kind.app_error()
    }

    /// HTTP-style status number.
    pub fn status(&self) -> u16 {
        self.kind.status()
    }

    /// Client-facing message.
    ///
    /// Classified errors render as `"<appcode> <apperror>[: <detail>]"`.
    /// Unclassified faults render their raw message.
    pub fn message(&self) -> String {
        match (self.kind.app_code(), self.kind.app_error()) {
            (Some(code), Some(label)) => match self.detail.as_deref() {
                Some(detail) => format!("{code} {label}: {detail}"),
                None => format!("{code} {label}"),
            },
            _ => self.detail.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {}

impl From<ParameterError> for Error {
    fn from(value: ParameterError) -> Self {
        match value {
            ParameterError::Missing { name } => Self::missing_parameter(name),
            ParameterError::InvalidCharacterClass { .. } => Self::internal(value.to_string()),
            ParameterError::TooLong { .. } | ParameterError::IllegalCharacter { .. } => {
                Self::illegal_parameter(value.to_string())
            }
        }
    }
}
