//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **namespace_store**: in-process namespace storage
//! - **authentication**: authsource dispatch and the local token table
//! - **policy**: namespace-creation allow list
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod authentication;
pub mod namespace_store;
pub mod policy;
