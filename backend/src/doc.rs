//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the domain
//! schema wrappers from [`crate::inbound::http::schemas`] and the bearer
//! token security scheme. The generated document backs Swagger UI (debug
//! builds) and is exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::complaints::{
    AuthorBody, AuthorRef, ComplaintBody, CreateComplaintRequest, DeleteResponse, TriageRequest,
};
use crate::inbound::http::maintenance::MaintenanceBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{AccountResponse, LoginRequest, RegisterRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
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
                    .description(Some(
                        "Token returned by POST /api/users/register or /api/users/login.",
                    ))
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
        title = "Hostel complaints API",
        description = "Hostel-scoped complaint filing, voting and warden triage."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::get_complaint,
        crate::inbound::http::complaints::vote_complaint,
        crate::inbound::http::complaints::update_complaint,
        crate::inbound::http::complaints::delete_complaint,
        crate::inbound::http::maintenance::list_maintenance,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        ComplaintBody,
        AuthorRef,
        AuthorBody,
        CreateComplaintRequest,
        TriageRequest,
        DeleteResponse,
        MaintenanceBody,
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "complaints", description = "Complaint lifecycle"),
        (name = "maintenance", description = "Scheduled maintenance checks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
