//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response bodies,
//! the domain [`Error`](crate::domain::Error) envelope and the bearer token
//! security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::text::TransformKind;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginForm, SignupRequest, TokenResponse, UserResponse};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::history::HistoryItem;
use crate::inbound::http::transform::{TransformRequest, TransformResponse};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Register the bearer token scheme issued by `POST /auth/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tidytext API",
        description = "Text clean-up, slug, case and spelling transforms with per-user history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::transform::clean,
        crate::inbound::http::transform::slug,
        crate::inbound::http::transform::camel,
        crate::inbound::http::transform::snake,
        crate::inbound::http::transform::title,
        crate::inbound::http::transform::spell,
        crate::inbound::http::history::list_history,
        crate::inbound::http::history::delete_history_item,
        crate::inbound::http::history::clear_history,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        TransformKind,
        SignupRequest,
        LoginForm,
        TokenResponse,
        UserResponse,
        TransformRequest,
        TransformResponse,
        HistoryItem,
        HealthStatus,
    )),
    tags(
        (name = "auth", description = "Account signup, login and identity"),
        (name = "transform", description = "Text transformations"),
        (name = "history", description = "Per-user transformation history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use utoipa::openapi::path::HttpMethod;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::{OpenApi as Document, RefOr};

    #[fixture]
    fn doc() -> Document {
        ApiDoc::openapi()
    }

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
    #[case("/auth/signup")]
    #[case("/auth/login")]
    #[case("/auth/me")]
    #[case("/api/clean")]
    #[case("/api/slug")]
    #[case("/api/case/camel")]
    #[case("/api/case/snake")]
    #[case("/api/case/title")]
    #[case("/api/spell")]
    #[case("/history")]
    #[case("/history/{id}")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(doc: Document, #[case] path: &str) {
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn history_path_documents_list_and_clear(doc: Document) {
        let item = doc.paths.paths.get("/history").expect("history path");
        assert!(item.get.is_some());
        assert!(item.delete.is_some());
        assert!(doc.paths.get_path_operation("/history/{id}", HttpMethod::Delete).is_some());
    }

    #[rstest]
    fn bearer_scheme_is_registered(doc: Document) {
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("HistoryItem", &["id", "original_text", "result_text", "type", "timestamp"])]
    #[case("TokenResponse", &["access_token", "token_type"])]
    #[case("UserResponse", &["id", "username"])]
    fn schemas_expose_wire_field_names(
        doc: Document,
        #[case] name: &str,
        #[case] fields: &[&str],
    ) {
        let components = doc.components.as_ref().expect("components");
        let schema = components.schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
