//! Unit tests for the layering lint.

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource::new(file, contents)])
}

fn messages(result: Result<(), ArchitectureLintError>) -> Vec<String> {
    match result {
        Err(ArchitectureLintError::Violations(violations)) => violations
            .into_iter()
            .map(|violation| violation.message)
            .collect(),
        other => panic!("expected violations, got {other:?}"),
    }
}

#[rstest]
#[case(
    "inbound/http/namespaces.rs",
    "use crate::domain::NamespaceId; fn handler() { let _ = NamespaceId::PARAMETER; }"
)]
#[case(
    "inbound/http/routes.rs",
    "use actix_web::web; use crate::middleware::Trace; fn configure() {}"
)]
#[case(
    "outbound/namespace_store.rs",
    "use tokio::sync::RwLock; use crate::domain::ports::NamespaceStore; struct Store;"
)]
#[case(
    "outbound/authentication/local.rs",
    "use sha2::{Digest, Sha256}; fn digest() { let _ = Sha256::new(); }"
)]
#[case(
    "domain/mapper.rs",
    "use super::ports::{Authenticator, NamespaceStore}; use tracing::debug; fn get() {}"
)]
#[case(
    "domain/mapper_tests.rs",
    "use super::*; #[tokio::test] async fn reads() {}"
)]
fn allowed_dependencies_pass(#[case] file: &str, #[case] contents: &str) {
    let result = lint_one(file, contents);
    assert!(result.is_ok(), "result: {result:?}");
}

#[rstest]
#[case(
    "inbound/http/namespaces.rs",
    "use crate::outbound::namespace_store::InMemoryNamespaceStore; fn handler() {}",
    "inbound layer must not depend on crate::outbound"
)]
#[case(
    "inbound/http/namespaces.rs",
    "use idmapping::outbound::policy::AuthsourceAllowList; fn handler() {}",
    "inbound layer must not depend on crate::outbound"
)]
#[case(
    "inbound/http/state.rs",
    "fn build() { let _ = crate::server::build_app; }",
    "inbound layer must not depend on crate::server"
)]
#[case(
    "inbound/http/auth.rs",
    "use sha2::Sha256; fn digest() {}",
    "inbound layer must not depend on external crate `sha2`"
)]
#[case(
    "domain/namespace.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Namespace;",
    "domain layer must not depend on external crate `utoipa`"
)]
#[case(
    "domain/error.rs",
    "impl actix_web::ResponseError for Error {}",
    "domain layer must not depend on external crate `actix_web`"
)]
#[case(
    "domain/mapper.rs",
    "use super::super::settings::Settings; fn new() {}",
    "domain layer must not depend on crate::settings"
)]
#[case(
    "domain/auth.rs",
    "use crate::inbound::http::ApiResult; fn parse() {}",
    "domain layer must not depend on crate::inbound"
)]
#[case(
    "outbound/policy.rs",
    "use crate::middleware::trace::TraceId; fn allow() {}",
    "outbound layer must not depend on crate::middleware"
)]
#[case(
    "outbound/namespace_store.rs",
    "use actix_web::web::Data; struct Store;",
    "outbound layer must not depend on external crate `actix_web`"
)]
fn boundary_crossings_are_reported(
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: &str,
) {
    let found = messages(lint_one(file, contents));
    assert!(
        found.iter().any(|message| message == expected),
        "expected {expected:?} in {found:?}"
    );
}

#[rstest]
fn repeated_crossings_in_one_file_are_reported_once() {
    let found = messages(lint_one(
        "domain/mapper.rs",
        "use actix_web::web; fn a() { let _ = actix_web::HttpResponse::Ok(); }",
    ));
    assert_eq!(found, ["domain layer must not depend on external crate `actix_web`"]);
}

#[rstest]
fn files_outside_the_layers_are_rejected() {
    let result = lint_one("server/mod.rs", "fn main() {}");
    assert!(matches!(
        result,
        Err(ArchitectureLintError::UnknownLayer { file }) if file == PathBuf::from("server/mod.rs")
    ));
}

#[rstest]
fn unparsable_sources_are_rejected() {
    let result = lint_one("domain/broken.rs", "fn (");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn violation_report_lists_every_file() {
    let err = lint_sources(&[
        LintSource::new("domain/a.rs", "use hex::encode;"),
        LintSource::new("outbound/b.rs", "use crate::inbound::http;"),
    ])
    .expect_err("two violations");
    let rendered = err.to_string();
    assert!(rendered.starts_with("layer boundary violations:"));
    assert!(rendered.contains("- domain/a.rs: domain layer must not depend on external crate `hex`"));
    assert!(rendered.contains("- outbound/b.rs: outbound layer must not depend on crate::inbound"));
}
