//! Authentication extractor for the metrics endpoints.
//!
//! Provides an extractor that requires a valid bearer token in route
//! handlers. Handlers that take [`RequireAuth`] never run for
//! unauthenticated requests.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::services::auth::{self, Claims};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Rejects with 401 (as an [`AppError::Auth`] JSON envelope) when the
/// `Authorization` header is missing or does not carry a verifiable JWT.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAuth(pub Claims);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Auth(auth::AuthError::MissingToken))?;

        let claims = auth::verify_token(&state.config().jwt_secret, token)?;

        Ok(Self(claims))
    }
}
