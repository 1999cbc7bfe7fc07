//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the JSON error envelope:
//!
//! ```text
//! {"error": {"httpcode": 404, "httpstatus": "Not Found", "appcode": 50010,
//!            "apperror": "No such namespace", "message": "50010 No such namespace: foo"}}
//! ```
//!
//! Unclassified faults and framework-level failures omit `appcode` and
//! `apperror`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message for requests whose path matches no route.
pub const NOT_FOUND_MESSAGE: &str = "404 Not Found: The requested URL was not found on the \
     server.  If you entered the URL manually please check your spelling and try again.";
/// Message for requests whose path matches but whose method does not.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str =
    "405 Method Not Allowed: The method is not allowed for the requested URL.";

/// Error payload nested under the envelope's `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// HTTP status number.
    #[schema(example = 404)]
    pub httpcode: u16,
    /// HTTP reason phrase.
    #[schema(example = "Not Found")]
    pub httpstatus: String,
    /// Application error code; absent for unclassified faults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 50010)]
    pub appcode: Option<u32>,
    /// Application error label; absent for unclassified faults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "No such namespace")]
    pub apperror: Option<String>,
    /// Human-readable message.
    #[schema(example = "50010 No such namespace: foo")]
    pub message: String,
}

/// JSON error envelope returned by every failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    fn framework(status: StatusCode, message: &str) -> Self {
        Self {
            error: ErrorBody {
                httpcode: status.as_u16(),
                httpstatus: reason_phrase(status),
                appcode: None,
                apperror: None,
                message: message.to_owned(),
            },
        }
    }
}

impl From<&Error> for ErrorEnvelope {
    fn from(value: &Error) -> Self {
        let status = status_for(value.kind());
        Self {
            error: ErrorBody {
                httpcode: status.as_u16(),
                httpstatus: reason_phrase(status),
                appcode: value.app_code(),
                apperror: value.app_error().map(str::to_owned),
                message: value.message(),
            },
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_owned()
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    StatusCode::from_u16(kind.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind().is_caller_fault() {
            info!(error = %self, "request failed");
        } else {
            error!(error = %self, "unclassified fault while handling request");
        }
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::from(self))
    }
}

/// Fallback handler for unmatched paths.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorEnvelope::framework(
        StatusCode::NOT_FOUND,
        NOT_FOUND_MESSAGE,
    ))
}

/// Fallback handler for unsupported methods on a known path.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorEnvelope::framework(
        StatusCode::METHOD_NOT_ALLOWED,
        METHOD_NOT_ALLOWED_MESSAGE,
    ))
}
