//! Handlers for the faculty access request endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use campus_auth::AuthClaims;

use crate::error::{ApiRequestsError, ApiResult};
use crate::models::{
    AdminRequestResponse, CreateRequestBody, DecideRequestBody, ListRequestsQuery,
    MyStatusResponse, RequestListResponse,
};
use crate::router::RequestsState;

/// Submit a faculty access request for the authenticated user.
#[utoipa::path(
    post,
    path = "/admin-requests",
    tag = "Faculty Access Requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = AdminRequestResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A pending request already exists"),
        (status = 429, description = "Too many submissions"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_request(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
    Json(body): Json<CreateRequestBody>,
) -> ApiResult<(StatusCode, Json<AdminRequestResponse>)> {
    let user_id: Uuid = claims
        .user_id()
        .map_err(|_| ApiRequestsError::Unauthorized)?
        .into();

    // Counted before any storage work so hammering the endpoint cannot
    // generate load past the limit.
    if !state.rate_limiter.check(user_id) {
        tracing::warn!(
            security = true,
            user_id = %user_id,
            "Faculty access request rate limit exceeded"
        );
        return Err(ApiRequestsError::TooManyRequests);
    }

    // The reason is normalized by the service: trimmed, truncated to 500
    // characters, never rejected for length.
    let request = state.service.create_request(user_id, body.reason).await?;

    Ok((StatusCode::CREATED, Json(request.into())))
}

/// List faculty access requests. Reviewer only.
#[utoipa::path(
    get,
    path = "/admin-requests",
    tag = "Faculty Access Requests",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "List of requests", body = RequestListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the reviewer"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_requests(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
    Query(query): Query<ListRequestsQuery>,
) -> ApiResult<Json<RequestListResponse>> {
    let requests = state
        .service
        .list_requests(&claims.email, query.status)
        .await?;

    let items: Vec<AdminRequestResponse> = requests.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(RequestListResponse { items, total }))
}

/// Get the authenticated user's own request status.
#[utoipa::path(
    get,
    path = "/admin-requests/my-status",
    tag = "Faculty Access Requests",
    responses(
        (status = 200, description = "Own request status", body = MyStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_status(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
) -> ApiResult<Json<MyStatusResponse>> {
    let user_id: Uuid = claims
        .user_id()
        .map_err(|_| ApiRequestsError::Unauthorized)?
        .into();

    let latest = state.service.own_status(user_id).await?;

    Ok(Json(latest.into()))
}

/// Approve or reject a pending request. Reviewer only.
#[utoipa::path(
    patch,
    path = "/admin-requests/{id}",
    tag = "Faculty Access Requests",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = DecideRequestBody,
    responses(
        (status = 200, description = "Request reviewed", body = AdminRequestResponse),
        (status = 400, description = "Malformed request ID or action"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the reviewer"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already reviewed"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn decide_request(
    State(state): State<RequestsState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
    Json(body): Json<DecideRequestBody>,
) -> ApiResult<Json<AdminRequestResponse>> {
    let reviewed = state
        .service
        .decide(id, body.action.into(), &claims.email)
        .await?;

    Ok(Json(reviewed.into()))
}
