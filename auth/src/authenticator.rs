use chrono::Duration;
use uuid::Uuid;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Role;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Credential verifier combining password hashing and token issuance.
///
/// The service's coordinator delegates the "does this plaintext match this
/// stored hash, and if so mint a token pair" step here; the account lookup
/// itself stays with the caller.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Access/refresh token pair minted for an authenticated subject.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator from the signing secret and token
    /// lifetimes.
    pub fn new(jwt_secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret, access_ttl, refresh_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token pair for the subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - password does not match the stored hash
    /// * `Password` - the stored hash is unusable
    /// * `Token` - token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        role: Role,
        user_id: Uuid,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(subject, role, user_id)?)
    }

    /// Mint a token pair without verifying a password. Registration uses
    /// this right after persisting the new account.
    ///
    /// # Errors
    /// * `TokenError` - token signing failed
    pub fn issue_token_pair(
        &self,
        subject: &str,
        role: Role,
        user_id: Uuid,
    ) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.token_codec.issue_access(subject, role, user_id)?,
            refresh_token: self.token_codec.issue_refresh(subject)?,
        })
    }

    /// The underlying token codec, for validation and refresh flows.
    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
