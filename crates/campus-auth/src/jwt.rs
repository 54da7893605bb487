//! JWT encoding and decoding.
//!
//! Tokens are HS256-signed with a secret shared with the identity
//! provider. Encoding exists for tests and tooling; the service itself
//! only decodes.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::AuthClaims;
use crate::error::AuthError;

/// Shared HS256 signing secret.
#[derive(Clone)]
pub struct JwtSecret(pub String);

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the secret itself.
        f.write_str("JwtSecret(..)")
    }
}

/// Encode claims into a signed token.
///
/// # Errors
///
/// Returns `AuthError::EncodingFailed` if serialization fails.
pub fn encode_token(claims: &AuthClaims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::EncodingFailed(e.to_string()))
}

/// Decode and validate a token, returning its claims.
///
/// # Errors
///
/// - `AuthError::TokenExpired` - the exp claim is in the past
/// - `AuthError::InvalidSignature` - signature verification failed
/// - `AuthError::InvalidToken` - malformed token or wrong algorithm
pub fn decode_token(token: &str, secret: &str) -> Result<AuthClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(map_jwt_error)
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        other => AuthError::InvalidToken(format!("{other:?}")),
    }
}
