//! Bearer-token authentication
//!
//! Tokens are HS256 JWTs whose subject is the acting user's id.

pub mod extractor;
pub mod jwt;

pub use extractor::AuthUser;
pub use jwt::{Claims, JwtAuth, TOKEN_ISSUER};

use axum::http::{header::AUTHORIZATION, HeaderMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Couldn't find JWT")]
    NoCredential,

    #[error("Couldn't validate JWT")]
    InvalidCredential,
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::NoCredential)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::NoCredential)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(AuthError::NoCredential);
    }

    Ok(token)
}
