use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;

/// Port for the authentication coordinator: the three independent entry
/// operations of the token workflow. Register writes the store exactly
/// once; login and refresh are read-only.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and mint its first token pair.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - an account with this email exists
    /// * `PasswordMismatch` - confirmation copy differs from the password
    /// * `DatabaseError` - store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Verify credentials and mint a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown email or wrong password
    /// * `DatabaseError` - store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Mint a fresh access token from an unexpired refresh token. The
    /// refresh token is returned unchanged; it is never rotated or
    /// consumed.
    ///
    /// # Errors
    /// * `InvalidToken` - token malformed or signature invalid
    /// * `UserNotFound` - extracted subject has no account
    /// * `InvalidRefreshToken` - token expired or subject mismatch
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
}
