//! Handlers for the admin user-management endpoints.

use axum::{extract::State, Extension, Json};
use validator::Validate;

use campus_auth::AuthClaims;

use crate::error::ApiResult;
use crate::models::{MessageResponse, RevokeAccessBody, UserListResponse, UserResponse};
use crate::router::RequestsState;

/// List all portal users. Reviewer only.
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin - Users",
    responses(
        (status = 200, description = "List of users", body = UserListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the reviewer"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
) -> ApiResult<Json<UserListResponse>> {
    let users = state.service.list_users(&claims.email).await?;

    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(UserListResponse { items, total }))
}

/// Revoke a user's faculty access. Reviewer only.
#[utoipa::path(
    post,
    path = "/admin/users/revoke",
    tag = "Admin - Users",
    request_body = RevokeAccessBody,
    responses(
        (status = 200, description = "Access revoked", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the reviewer or target is the super admin"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn revoke_access(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
    Json(body): Json<RevokeAccessBody>,
) -> ApiResult<Json<MessageResponse>> {
    body.validate()?;

    state.service.revoke(&body.email, &claims.email).await?;

    Ok(Json(MessageResponse {
        message: "Faculty access revoked".to_string(),
    }))
}
