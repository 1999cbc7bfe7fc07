//! Namespace API handlers.
//!
//! ```text
//! GET  /api/v1/namespace/{namespace}   Fetch namespace metadata
//! PUT  /api/v1/namespace/{namespace}   Create a namespace (POST is an alias)
//! ```
//!
//! Credentials travel in the `Authorization: <authsource> <token>` header.
//! The header is parsed before the namespace id is validated.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Credential, Namespace, NamespaceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::credential_from_headers;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Namespace metadata returned by `GET /api/v1/namespace/{namespace}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NamespaceResponse {
    /// Namespace identifier.
    #[schema(example = "foo")]
    pub namespace: String,
    /// Whether anyone may read the namespace.
    pub publicly_mappable: bool,
    /// Authorized users as sorted `authsource/username` strings.
    #[schema(example = json!(["bag/bat", "bar/baz"]))]
    pub users: Vec<String>,
}

impl From<&Namespace> for NamespaceResponse {
    fn from(value: &Namespace) -> Self {
        Self {
            namespace: value.id().to_string(),
            publicly_mappable: value.is_publicly_mappable(),
            users: value
                .authorized_users()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Fetch a namespace.
///
/// Public namespaces are returned to anyone. Private namespaces require a
/// credential belonging to an authorized user.
#[utoipa::path(
    get,
    path = "/api/v1/namespace/{namespace}",
    params(("namespace" = String, Path, description = "Namespace identifier")),
    responses(
        (status = 200, description = "Namespace metadata", body = NamespaceResponse),
        (status = 400, description = "Malformed credential or namespace id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Caller may not read the namespace", body = ErrorEnvelope),
        (status = 404, description = "No such namespace", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["namespaces"],
    operation_id = "getNamespace",
    security([], ("AuthsourceToken" = []))
)]
pub async fn get_namespace(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<web::Json<NamespaceResponse>> {
    let credential = credential_from_headers(&state.validator, request.headers())?;
    let namespace = NamespaceId::new(&state.validator, path.into_inner())?;
    let found = state.mapper.get_namespace(&namespace, credential).await?;
    Ok(web::Json(NamespaceResponse::from(&found)))
}

/// Create a private namespace owned by the caller.
#[utoipa::path(
    method(put, post),
    path = "/api/v1/namespace/{namespace}",
    params(("namespace" = String, Path, description = "Namespace identifier")),
    responses(
        (status = 204, description = "Namespace created"),
        (status = 400, description = "Malformed credential or namespace id", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Caller may not create namespaces", body = ErrorEnvelope),
        (status = 409, description = "Namespace already exists", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["namespaces"],
    operation_id = "createNamespace",
    security(("AuthsourceToken" = []))
)]
pub async fn create_namespace(
    state: web::Data<HttpState>,
    request: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let credential = credential_from_headers(&state.validator, request.headers())?;
    let (authsource, token) = Credential::require(credential)?.into_parts();
    let namespace = NamespaceId::new(&state.validator, path.into_inner())?;
    state
        .mapper
        .create_namespace(&authsource, &token, &namespace)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "namespaces_tests.rs"]
mod tests;
