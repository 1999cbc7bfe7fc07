//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod namespaces;
pub mod routes;
pub mod state;

pub use error::ApiResult;
