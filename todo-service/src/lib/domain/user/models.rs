use std::fmt;
use std::str::FromStr;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// User account aggregate.
///
/// The account flags mirror the account lifecycle states the authorizer
/// consults; registration sets all of them true.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Construct a freshly registered account: role USER, every account
    /// flag true. The password hash must already be computed.
    pub fn register(username: Username, email: EmailAddress, password_hash: String) -> Self {
        Self::with_role(username, email, password_hash, Role::User)
    }

    /// Construct an account with an explicit role (admin user creation).
    pub fn with_role(
        username: Username,
        email: EmailAddress,
        password_hash: String,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            enabled: true,
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-20 characters and contains only alphanumeric
/// characters and underscores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 20 characters
    /// * `InvalidCharacters` - Contains characters outside [A-Za-z0-9_]
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UsernameError::InvalidCharacters);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for account creation.
///
/// Enforces the account password policy: 8-20 characters with at least one
/// lowercase letter, one uppercase letter, one digit, and one special
/// character. Login does not use this type; a wrong password there is a
/// credential failure, not a policy violation.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 20;
    const SPECIALS: &'static str = "!@#$%^&*()_+=-{}|:;\"'<>,.?/";

    /// Validate a plaintext password against the policy.
    ///
    /// # Errors
    /// * `BadLength` - outside 8-20 characters
    /// * `MissingCharacterClass` - lacks lower, upper, digit, or special
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::BadLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| Self::SPECIALS.contains(c));
        if !(has_lower && has_upper && has_digit && has_special) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never log or print plaintext passwords.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// Command to create a new user with domain types (admin operation).
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates. The password hash
/// is never touched by this command.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub role: Option<Role>,
    pub enabled: Option<bool>,
    pub account_non_expired: Option<bool>,
    pub account_non_locked: Option<bool>,
    pub credentials_non_expired: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_defaults_role_and_flags() {
        let user = User::register(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("a@x.com".to_string()).unwrap(),
            "hash".to_string(),
        );

        assert_eq!(user.role, Role::User);
        assert!(user.enabled);
        assert!(user.account_non_expired);
        assert!(user.account_non_locked);
        assert!(user.credentials_non_expired);
    }

    #[test]
    fn username_rejects_bad_input() {
        assert!(Username::new("ab".to_string()).is_err());
        assert!(Username::new("a".repeat(21)).is_err());
        assert!(Username::new("has space".to_string()).is_err());
        assert!(Username::new("has-hyphen".to_string()).is_err());
        assert!(Username::new("alice_01".to_string()).is_ok());
    }

    #[test]
    fn email_rejects_bad_input() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
    }

    #[test]
    fn password_policy_requires_all_classes() {
        assert!(Password::new("P@ssw0rd1".to_string()).is_ok());
        assert!(Password::new("short".to_string()).is_err());
        assert!(Password::new("alllowercase1!".to_string()).is_err());
        assert!(Password::new("NoDigits!!".to_string()).is_err());
        assert!(Password::new("NoSpecials11".to_string()).is_err());
        assert!(Password::new("P@ss1".to_string()).is_err());
    }

    #[test]
    fn password_debug_hides_value() {
        let password = Password::new("P@ssw0rd1".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(*****)");
    }
}
