//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the namespace and health endpoints, the response and
//! error envelope schemas, and the `Authorization` header scheme carrying
//! `<authsource> <token>` credentials.
//!
//! The document backs Swagger UI when enabled and is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::error::{ErrorBody, ErrorEnvelope};
use crate::inbound::http::namespaces::NamespaceResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the authsource token header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthsourceToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Authsource id and token separated by whitespace, e.g. `local 4f1c...`.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "ID mapping service API",
        description = "Namespace lookup and creation guarded by authsource tokens.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::namespaces::get_namespace,
        crate::inbound::http::namespaces::create_namespace,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(NamespaceResponse, ErrorEnvelope, ErrorBody)),
    tags(
        (name = "namespaces", description = "Namespace metadata and creation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("NamespaceResponse", "publicly_mappable")]
    #[case("NamespaceResponse", "users")]
    #[case("ErrorBody", "appcode")]
    #[case("ErrorBody", "message")]
    #[case("ErrorEnvelope", "error")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(schema).expect("schema registered"), field);
    }

    #[rstest]
    fn namespace_path_supports_read_and_create() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/namespace/{namespace}")
            .expect("namespace path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.post.is_some());
        assert!(item.delete.is_none());
    }

    #[rstest]
    fn header_security_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("AuthsourceToken"));
    }
}
