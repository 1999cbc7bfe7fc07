//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::Validator;
use crate::domain::ports::NamespaceMapper;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub mapper: Arc<dyn NamespaceMapper>,
    pub validator: Validator,
}

impl HttpState {
    /// Construct state from the mapping port and the shared validator.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    /// use idmapping::domain::Validator;
    /// use idmapping::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(mapper), Validator::default());
    /// ```
    pub fn new(mapper: Arc<dyn NamespaceMapper>, validator: Validator) -> Self {
        Self { mapper, validator }
    }
}
