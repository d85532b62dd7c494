//! Admin user management commands.

use storepulse_core::{Email, EmailError};
use storepulse_server::db::{self, AdminUserRepository, RepositoryError};
use storepulse_server::services::auth::{self, AuthError};

use super::MissingDatabaseUrl;

/// Errors that can occur while managing admin users.
#[derive(Debug, thiserror::Error)]
pub enum AdminCommandError {
    #[error(transparent)]
    MissingDatabaseUrl(#[from] MissingDatabaseUrl),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create an admin user for the metrics dashboard.
///
/// # Errors
///
/// Returns `AdminCommandError` if the email is malformed, already taken,
/// or the database is unreachable.
pub async fn create_user(email: &str, password: &str) -> Result<(), AdminCommandError> {
    let email = Email::parse(email)?;
    let password_hash = auth::hash_password(password)?;

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let user = AdminUserRepository::new(&pool)
        .create(&email, &password_hash)
        .await?;

    tracing::info!(id = %user.id, email = %user.email, "Admin user created");
    Ok(())
}
