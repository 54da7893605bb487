//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use campus_api_requests::models::{
    AdminRequestResponse, CreateRequestBody, DecideRequestBody, DecisionAction, MessageResponse,
    MyStatusResponse, RequestListResponse, RevokeAccessBody, UserListResponse, UserResponse,
};
use campus_db::models::{AdminRequestStatus, UserRole};

use crate::health::HealthResponse;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the portal API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Portal API",
        version = "0.1.0",
        description = "Faculty access request workflow for the campus portal"
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server")
    ),
    modifiers(&SecurityAddon),
    paths(
        crate::health::health_handler,
        campus_api_requests::handlers::admin_requests::create_request,
        campus_api_requests::handlers::admin_requests::list_requests,
        campus_api_requests::handlers::admin_requests::my_status,
        campus_api_requests::handlers::admin_requests::decide_request,
        campus_api_requests::handlers::admin_users::list_users,
        campus_api_requests::handlers::admin_users::revoke_access,
    ),
    components(schemas(
        HealthResponse,
        CreateRequestBody,
        DecideRequestBody,
        DecisionAction,
        AdminRequestResponse,
        RequestListResponse,
        MyStatusResponse,
        RevokeAccessBody,
        UserResponse,
        UserListResponse,
        MessageResponse,
        AdminRequestStatus,
        UserRole,
    )),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Faculty Access Requests", description = "Request submission and review"),
        (name = "Admin - Users", description = "User directory and access revocation")
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated spec.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
