use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Authorization role carried by an account and embedded in access tokens.
///
/// Closed set; the wire representation matches the stored representation
/// (`"USER"` / `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for role strings outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Payload of a signed bearer token.
///
/// Access tokens carry `role` and `userId`; refresh tokens carry only the
/// subject and the timestamps. The subject is the account email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Role at issuance time (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Account id (access tokens only)
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Claims {
    /// Build access-token claims expiring `ttl` from now.
    pub fn access(subject: impl Into<String>, role: Role, user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            role: Some(role),
            user_id: Some(user_id),
        }
    }

    /// Build refresh-token claims expiring `ttl` from now. No extra claims
    /// beyond the subject and timestamps.
    pub fn refresh(subject: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            role: None,
            user_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_claims_carry_role_and_user_id() {
        let user_id = Uuid::new_v4();
        let claims = Claims::access("a@x.com", Role::Admin, user_id, Duration::minutes(15));

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.user_id, Some(user_id));
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn refresh_claims_carry_subject_only() {
        let claims = Claims::refresh("a@x.com", Duration::days(7));

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, None);
        assert_eq!(claims.user_id, None);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "USER");
        assert!("user".parse::<Role>().is_err());
    }
}
