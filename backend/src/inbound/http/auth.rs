//! Credential extraction used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! `Authorization` header handling here.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};

use crate::domain::{Credential, Error, MALFORMED_CREDENTIAL_MESSAGE, Validator};

use super::ApiResult;

/// Parse the optional `Authorization: <authsource> <token>` header.
pub fn credential_from_headers(
    validator: &Validator,
    headers: &HeaderMap,
) -> ApiResult<Option<Credential>> {
    let raw = match headers.get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| Error::illegal_parameter(MALFORMED_CREDENTIAL_MESSAGE))?,
        ),
        None => None,
    };
    Credential::parse(validator, raw)
}
