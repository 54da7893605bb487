//! JWT verification and authentication middleware for the campus portal.
//!
//! The identity provider issues HS256 tokens with a secret shared with this
//! service. The service trusts the verified identity - it never re-validates
//! credentials. The middleware inserts [`AuthClaims`] into request
//! extensions for handlers to consume.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod middleware;

pub use claims::AuthClaims;
pub use error::AuthError;
pub use jwt::{decode_token, encode_token, JwtSecret};
pub use middleware::jwt_auth_middleware;
