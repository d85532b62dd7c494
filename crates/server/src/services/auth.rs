//! Password hashing and bearer-token issuance/verification.
//!
//! Passwords are hashed with Argon2id (PHC string format). Tokens are
//! HS256 JWTs signed with the configured secret, valid for 24 hours.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storepulse_core::AdminUserId;

use crate::db::admin_users::AdminUser;

/// Token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Errors from the authentication gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on the request.
    #[error("missing bearer token")]
    MissingToken,

    /// The token failed signature or expiry validation.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Hashing or signing failed (not a client error).
    #[error("credential processing failed: {0}")]
    Crypto(String),
}

/// Claims carried in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user ID.
    pub sub: i32,
    /// Admin email at issuance time.
    pub email: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// The admin user this token was issued to.
    #[must_use]
    pub const fn admin_user_id(&self) -> AdminUserId {
        AdminUserId::new(self.sub)
    }
}

/// Hash a password using Argon2id.
///
/// Returns the hash in PHC format: `$argon2id$v=19$m=...,t=...,p=...$salt$hash`
///
/// # Errors
///
/// Returns `AuthError::Crypto` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// # Errors
///
/// Returns `AuthError::Crypto` if the stored hash is unparseable or
/// verification fails for a reason other than a wrong password.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid password hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!(
            "password verification failed: {e}"
        ))),
    }
}

/// Issue a 24-hour bearer token for an admin user.
///
/// # Errors
///
/// Returns `AuthError::Crypto` if signing fails.
pub fn issue_token(secret: &SecretString, user: &AdminUser) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.as_i32(),
        email: user.email.as_str().to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AuthError::Crypto(format!("token signing failed: {e}")))
}

/// Verify a bearer token and return its claims.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the signature, shape, or expiry
/// check fails.
pub fn verify_token(secret: &SecretString, token: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storepulse_core::Email;

    use super::*;

    fn test_user() -> AdminUser {
        AdminUser {
            id: AdminUserId::new(7),
            email: Email::parse("admin@example.com").unwrap(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_secret() -> SecretString {
        SecretString::from("k9#mP2$vX8@qL5!wN3^bT6&hJ1*fD4%z")
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-hash"),
            Err(AuthError::Crypto(_))
        ));
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let secret = test_secret();
        let token = issue_token(&secret, &test_user()).unwrap();

        let claims = verify_token(&secret, &token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.admin_user_id(), AdminUserId::new(7));
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(&test_secret(), &test_user()).unwrap();
        let other = SecretString::from("a7!bQ4@cR9#dS2$eT5%fU8^gV1&hW6*i");

        assert!(matches!(
            verify_token(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let secret = test_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: 7,
            email: "admin@example.com".to_owned(),
            iat: (now - Duration::hours(48)).timestamp(),
            exp: (now - Duration::hours(24)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&secret, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let secret = test_secret();
        let token = issue_token(&secret, &test_user()).unwrap();
        let tampered = format!("{token}x");

        assert!(matches!(
            verify_token(&secret, &tampered),
            Err(AuthError::InvalidToken)
        ));
    }
}
