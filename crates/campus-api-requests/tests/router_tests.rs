//! Router-level tests for the request API.
//!
//! Claims are injected with an extension layer instead of the JWT
//! middleware, so these tests exercise routing, extraction, and status
//! mapping without minting tokens.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Extension, Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use campus_auth::AuthClaims;
use campus_db::models::{User, UserRole};
use campus_requests::{
    InMemoryRateLimiter, InMemoryRequestStore, InMemoryUserStore, RateLimitConfig,
    RequestWorkflowService, ReviewerAuthority, UserStore,
};
use campus_api_requests::{requests_router, RequestsState};

const REVIEWER_EMAIL: &str = "dean@campus.edu";

struct TestApi {
    users: Arc<InMemoryUserStore>,
    requests: Arc<InMemoryRequestStore>,
    state: RequestsState,
}

fn api() -> TestApi {
    api_with_limit(RateLimitConfig::default())
}

fn api_with_limit(limit: RateLimitConfig) -> TestApi {
    let users = Arc::new(InMemoryUserStore::new());
    let requests = Arc::new(InMemoryRequestStore::new());
    let service = Arc::new(RequestWorkflowService::new(
        users.clone(),
        requests.clone(),
        ReviewerAuthority::new(Some(REVIEWER_EMAIL.to_string())),
    ));
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(limit));
    let state = RequestsState::new(service, rate_limiter);
    TestApi {
        users,
        requests,
        state,
    }
}

impl TestApi {
    /// Router with the given caller's claims injected.
    fn app_as(&self, user_id: Uuid, email: &str) -> Router {
        requests_router(self.state.clone())
            .layer(Extension(AuthClaims::new(user_id, email, 3600)))
    }

    async fn seed_user(&self, email: &str, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            name: "Test User".to_string(),
            institution: Some("Campus Institute of Technology".to_string()),
            mobile: Some("555-0100".to_string()),
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.clone()).await;
        user
    }
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_request_returns_created() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let response = app
        .oneshot(request(
            Method::POST,
            "/admin-requests",
            Some(json!({"reason": "I teach CS301"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["reason"], "I teach CS301");
    assert_eq!(body["email"], "maya@campus.edu");
}

#[tokio::test]
async fn duplicate_create_is_conflict() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let first = app
        .clone()
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = json_body(second).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(api.requests.count().await, 1);
}

#[tokio::test]
async fn create_is_rate_limited_before_storage() {
    let api = api_with_limit(RateLimitConfig {
        max_attempts: 1,
        window: std::time::Duration::from_secs(60),
    });
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let first = app
        .clone()
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(second).await;
    assert_eq!(body["error"], "rate_limited");
    // The limited attempt never reached storage.
    assert_eq!(api.requests.count().await, 1);
}

#[tokio::test]
async fn overlong_reason_is_truncated_not_rejected() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let response = app
        .oneshot(request(
            Method::POST,
            "/admin-requests",
            Some(json!({"reason": "x".repeat(501)})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let stored = body["reason"].as_str().unwrap();
    assert_eq!(stored.chars().count(), 500);
}

#[tokio::test]
async fn my_status_reports_absence_then_latest() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let empty = app
        .clone()
        .oneshot(request(Method::GET, "/admin-requests/my-status", None))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::OK);
    let body = json_body(empty).await;
    assert_eq!(body["has_request"], false);

    app.clone()
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();

    let populated = app
        .oneshot(request(Method::GET, "/admin-requests/my-status", None))
        .await
        .unwrap();
    let body = json_body(populated).await;
    assert_eq!(body["has_request"], true);
    assert_eq!(body["request"]["status"], "pending");
}

#[tokio::test]
async fn list_requests_requires_reviewer() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let app = api.app_as(student.id, &student.email);

    let response = app
        .oneshot(request(Method::GET, "/admin-requests", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn reviewer_lists_and_filters_requests() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    api.app_as(student.id, &student.email)
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();

    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let app = api.app_as(reviewer.id, REVIEWER_EMAIL);

    let all = app
        .clone()
        .oneshot(request(Method::GET, "/admin-requests", None))
        .await
        .unwrap();
    assert_eq!(all.status(), StatusCode::OK);
    let body = json_body(all).await;
    assert_eq!(body["total"], 1);

    let approved = app
        .oneshot(request(Method::GET, "/admin-requests?status=approved", None))
        .await
        .unwrap();
    let body = json_body(approved).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn malformed_request_id_is_bad_request() {
    let api = api();
    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let app = api.app_as(reviewer.id, REVIEWER_EMAIL);

    let response = app
        .oneshot(request(
            Method::PATCH,
            "/admin-requests/not-a-uuid",
            Some(json!({"action": "approve"})),
        ))
        .await
        .unwrap();

    // Path extraction rejects the ID before any lookup happens.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn approve_flow_over_http() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;
    let created = api
        .app_as(student.id, &student.email)
        .oneshot(request(Method::POST, "/admin-requests", Some(json!({}))))
        .await
        .unwrap();
    let request_id = json_body(created).await["id"].as_str().unwrap().to_string();

    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let app = api.app_as(reviewer.id, REVIEWER_EMAIL);

    let response = app
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/admin-requests/{request_id}"),
            Some(json!({"action": "approve"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(body["reviewed_by"], REVIEWER_EMAIL);

    // Deciding again conflicts.
    let again = app
        .oneshot(request(
            Method::PATCH,
            &format!("/admin-requests/{request_id}"),
            Some(json!({"action": "reject"})),
        ))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    // Role escalation happened.
    let updated = api.users.find_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(updated.role, UserRole::Admin);
}

#[tokio::test]
async fn unknown_decision_action_is_unprocessable() {
    let api = api();
    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let app = api.app_as(reviewer.id, REVIEWER_EMAIL);

    let response = app
        .oneshot(request(
            Method::PATCH,
            &format!("/admin-requests/{}", Uuid::new_v4()),
            Some(json!({"action": "escalate"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn user_directory_requires_reviewer() {
    let api = api();
    let student = api.seed_user("maya@campus.edu", UserRole::Student).await;

    let response = api
        .app_as(student.id, &student.email)
        .oneshot(request(Method::GET, "/admin/users", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let response = api
        .app_as(reviewer.id, REVIEWER_EMAIL)
        .oneshot(request(Method::GET, "/admin/users", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn revoke_demotes_user_over_http() {
    let api = api();
    let admin = api.seed_user("maya@campus.edu", UserRole::Admin).await;
    let reviewer = api.seed_user(REVIEWER_EMAIL, UserRole::SuperAdmin).await;
    let app = api.app_as(reviewer.id, REVIEWER_EMAIL);

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/admin/users/revoke",
            Some(json!({"email": "maya@campus.edu"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = api.users.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(updated.role, UserRole::Student);

    // The reviewer cannot revoke themselves.
    let response = app
        .oneshot(request(
            Method::POST,
            "/admin/users/revoke",
            Some(json!({"email": REVIEWER_EMAIL})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
