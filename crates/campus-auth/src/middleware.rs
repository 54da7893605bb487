//! JWT authentication middleware.
//!
//! Extracts the Bearer token from the Authorization header, validates it,
//! and inserts [`AuthClaims`] into request extensions for handlers.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AuthError;
use crate::jwt::{decode_token, JwtSecret};

/// JWT authentication middleware.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Decodes and validates the JWT
/// 3. Inserts [`AuthClaims`] into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{middleware, routing::get, Extension, Router};
/// use campus_auth::{jwt_auth_middleware, JwtSecret};
///
/// let router = Router::new()
///     .route("/admin-requests", get(list_requests))
///     .layer(middleware::from_fn(jwt_auth_middleware))
///     .layer(Extension(JwtSecret("secret".into())));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let secret = request
        .extensions()
        .get::<JwtSecret>()
        .ok_or_else(|| {
            tracing::error!("JWT secret not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
                .into_response()
        })?
        .0
        .clone();

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            (StatusCode::UNAUTHORIZED, "Missing Authorization header").into_response()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            "Authorization header must use Bearer scheme",
        )
            .into_response()
    })?;

    let claims = decode_token(token, &secret).map_err(|e| {
        let message = match e {
            AuthError::TokenExpired => "Token has expired",
            _ => "Invalid token",
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
