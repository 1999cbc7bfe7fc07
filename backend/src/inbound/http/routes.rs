//! Route table for the HTTP adapter.
//!
//! ```text
//! /api/v1/namespace/{namespace}   GET, PUT, POST; anything else is 405
//! /health/ready, /health/live     probes
//! everything else                 404 envelope
//! ```

use actix_web::web;

use super::error::{method_not_allowed, not_found};
use super::{health, namespaces};

/// Register API and probe routes on an `App` or `Scope`.
///
/// Callers still need to register [`HttpState`](super::state::HttpState) and
/// [`HealthState`](super::health::HealthState) as app data, and should set
/// [`default_service`] as the app-level fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1").service(
            web::resource("/namespace/{namespace}")
                .route(web::get().to(namespaces::get_namespace))
                .route(web::put().to(namespaces::create_namespace))
                .route(web::post().to(namespaces::create_namespace))
                .default_service(web::to(method_not_allowed)),
        ),
    )
    .service(health::ready)
    .service(health::live);
}

/// App-level fallback rendering the 404 envelope.
pub fn default_service() -> actix_web::Route {
    web::to(not_found)
}
