//! Authentication primitives for the todo service.
//!
//! Provides the stateless building blocks the service composes at its
//! boundaries:
//! - Password hashing and verification (Argon2id, PHC string format)
//! - Signed bearer-token issuance and validation (access + refresh pairs)
//! - Credential verification coordinating both
//!
//! Nothing in this crate performs I/O or touches a user store. Every
//! decision is a pure function of the inputs and the signing secret
//! injected at construction time.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("P@ssw0rd1").unwrap();
//! assert!(hasher.verify("P@ssw0rd1", &hash).unwrap());
//! ```
//!
//! ## Token Pairs
//! ```
//! use chrono::Duration;
//! use uuid::Uuid;
//! use auth::{Role, TokenCodec};
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//! let access = codec.issue_access("a@x.com", Role::User, Uuid::new_v4()).unwrap();
//! let claims = codec.validate(&access).unwrap();
//! assert_eq!(claims.sub, "a@x.com");
//! ```
//!
//! ## Credential Verification
//! ```
//! use chrono::Duration;
//! use uuid::Uuid;
//! use auth::{Authenticator, Role};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//! let hash = auth.hash_password("P@ssw0rd1").unwrap();
//! let pair = auth
//!     .authenticate("P@ssw0rd1", &hash, "a@x.com", Role::User, Uuid::new_v4())
//!     .unwrap();
//! assert!(!pair.access_token.is_empty());
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Role;
pub use token::TokenCodec;
pub use token::TokenError;
