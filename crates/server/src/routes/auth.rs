//! Registration and login handlers for the authentication gate.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use storepulse_core::Email;

use crate::db::{AdminUserRepository, RepositoryError};
use crate::error::AppError;
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

/// Credentials accepted by both register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 for a malformed email or an already-registered one.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<Value>, AppError> {
    let email =
        Email::parse(&payload.email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let password_hash = auth::hash_password(&payload.password)?;

    AdminUserRepository::new(state.pool())
        .create(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::BadRequest("User already exists".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(json!({"status": "ok", "message": "User registered"})))
}

/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 for an unknown email or a wrong password - deliberately
/// the same error for both.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<Value>, AppError> {
    let email =
        Email::parse(&payload.email).map_err(|_| AppError::Auth(AuthError::InvalidCredentials))?;

    let user = AdminUserRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    if !auth::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let token = auth::issue_token(&state.config().jwt_secret, &user)?;

    Ok(Json(json!({"status": "ok", "token": token})))
}
