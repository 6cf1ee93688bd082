use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Failures of the register/login/refresh workflows.
///
/// Each variant maps to exactly one HTTP status at the boundary; the
/// coordinator itself never sees status codes.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Register: email already taken (409).
    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Register: password and confirmation differ (400).
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Login: unknown email or wrong password (401).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh: subject extracted from the token has no account (404).
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Refresh: the presented token is malformed or its signature does
    /// not verify (400).
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Refresh: token parsed but failed full validation (400).
    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    /// Hashing infrastructure failure (500).
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Token signing failure at issuance (500).
    #[error("Token issuance failed: {0}")]
    TokenIssuance(TokenError),

    /// Store failure (500).
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            // Store-layer uniqueness is the last line of defense for the
            // register existence check race.
            UserError::EmailAlreadyExists(_) | UserError::UsernameAlreadyExists(_) => {
                AuthError::EmailAlreadyExists
            }
            UserError::NotFound(id) => AuthError::UserNotFound(id),
            other => AuthError::DatabaseError(other.to_string()),
        }
    }
}
