use std::fmt;

use auth::Role;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;

/// Token pair and account summary returned by register, login, and
/// refresh. Response shape only; nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub email: String,
    pub role: Role,
}

impl AuthSession {
    pub fn bearer(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        email: String,
        role: Role,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            email,
            role,
        }
    }
}

/// Command to register a new account.
///
/// The confirmation copy stays a raw string: comparing it against the
/// validated password is the coordinator's job, and a mismatch is an
/// invalid-argument failure, not a policy violation.
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub confirm_password: String,
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Command to log in with credentials.
///
/// The email is not format-validated here: an address that cannot exist
/// in the store fails authentication the same way an unknown one does.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
