//! JWT claims extractor.
//!
//! Token issuing lives in the external auth service; this backend only
//! verifies HS256 signatures with the shared secret and trusts the `sub`
//! claim as the caller's user ID.

use crate::responses::ApiResponse;
use crate::state::AppState;
use palaver_core::{ErrorResponse, PalaverError, UserId};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Token claims as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's ID.
    pub sub: String,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
}

/// Extractor for the authenticated caller.
///
/// Accepts the token from the `Authorization: Bearer` header or, for
/// WebSocket upgrades where browsers cannot set headers, from a `token`
/// query parameter.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Error type for authentication extraction.
pub struct AuthError(PalaverError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::failure(error_response));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).or_else(|| query_token(parts)).ok_or_else(|| {
            AuthError(PalaverError::Unauthorized(
                "Missing authentication token".to_string(),
            ))
        })?;

        let app_state = AppState::from_ref(state);
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(app_state.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| AuthError(PalaverError::InvalidToken(e.to_string())))?
        .claims;

        let user_id = UserId::parse(&claims.sub).map_err(|_| {
            AuthError(PalaverError::InvalidToken(
                "Subject is not a valid user ID".to_string(),
            ))
        })?;

        Ok(AuthenticatedUser { user_id })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn query_token(parts: &Parts) -> Option<String> {
    parts
        .uri
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .map(str::to_string)
}
