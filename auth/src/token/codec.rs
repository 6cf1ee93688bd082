use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::Role;
use super::errors::TokenError;

/// Encodes and decodes signed, self-contained bearer tokens.
///
/// Uses HS256 with a process-wide secret injected at construction; the
/// secret is never rotated within a process lifetime. The two configured
/// lifetimes distinguish the token kinds: short-lived access tokens carry
/// role and user id, long-lived refresh tokens carry only the subject.
/// Configuration is expected to keep the refresh lifetime strictly longer
/// than the access lifetime.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret and the two token lifetimes.
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access token for `subject` carrying the role and user id
    /// as of issuance time.
    ///
    /// # Errors
    /// * `EncodingFailed` - token signing failed
    pub fn issue_access(
        &self,
        subject: &str,
        role: Role,
        user_id: Uuid,
    ) -> Result<String, TokenError> {
        self.encode(&Claims::access(subject, role, user_id, self.access_ttl))
    }

    /// Issue a refresh token for `subject`. Carries no claims beyond the
    /// subject and timestamps.
    ///
    /// # Errors
    /// * `EncodingFailed` - token signing failed
    pub fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        self.encode(&Claims::refresh(subject, self.refresh_ttl))
    }

    /// Decode and fully validate a token: signature and expiry, with zero
    /// leeway.
    ///
    /// # Errors
    /// * `Expired` - the token's `exp` is in the past
    /// * `DecodingFailed` - bad signature or malformed payload
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::DecodingFailed(e.to_string()),
            })
    }

    /// Extract the subject from a token, verifying the signature but
    /// ignoring expiry. The refresh flow uses this to resolve the account
    /// before deciding whether the token is still usable.
    ///
    /// # Errors
    /// * `DecodingFailed` - bad signature or malformed payload
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| TokenError::DecodingFailed(e.to_string()))
    }

    /// Check a token end to end: signature verifies, not expired, and the
    /// decoded subject equals `expected_subject`. Any single failure
    /// yields false.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        match self.validate(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(_) => false,
        }
    }

    /// Configured access-token lifetime in milliseconds, for response
    /// payloads.
    pub fn access_ttl_millis(&self) -> i64 {
        self.access_ttl.num_milliseconds()
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::minutes(15), Duration::days(7))
    }

    /// Codec whose tokens are born expired (outside any leeway window).
    fn expired_codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::seconds(-120), Duration::seconds(-120))
    }

    #[test]
    fn access_token_round_trip() {
        let codec = codec();
        let user_id = Uuid::new_v4();

        let token = codec.issue_access("a@x.com", Role::User, user_id).unwrap();
        let claims = codec.validate(&token).unwrap();

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Some(Role::User));
        assert_eq!(claims.user_id, Some(user_id));
    }

    #[test]
    fn refresh_token_has_no_extra_claims() {
        let codec = codec();

        let token = codec.issue_refresh("a@x.com").unwrap();
        let claims = codec.validate(&token).unwrap();

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, None);
        assert_eq!(claims.user_id, None);
    }

    #[test]
    fn validate_rejects_wrong_secret() {
        let codec = codec();
        let other = TokenCodec::new(
            b"another_secret_key_32_bytes_long!!",
            Duration::minutes(15),
            Duration::days(7),
        );

        let token = codec.issue_refresh("a@x.com").unwrap();

        assert!(matches!(
            other.validate(&token),
            Err(TokenError::DecodingFailed(_))
        ));
    }

    #[test]
    fn validate_rejects_expired_token() {
        let token = expired_codec().issue_refresh("a@x.com").unwrap();

        assert!(matches!(codec().validate(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn validate_rejects_garbage() {
        assert!(matches!(
            codec().validate("not.a.token"),
            Err(TokenError::DecodingFailed(_))
        ));
    }

    #[test]
    fn extract_subject_ignores_expiry() {
        let token = expired_codec().issue_refresh("a@x.com").unwrap();

        assert_eq!(codec().extract_subject(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn extract_subject_still_checks_signature() {
        let other = TokenCodec::new(
            b"another_secret_key_32_bytes_long!!",
            Duration::minutes(15),
            Duration::days(7),
        );

        let token = other.issue_refresh("a@x.com").unwrap();

        assert!(codec().extract_subject(&token).is_err());
    }

    #[test]
    fn is_valid_checks_signature_expiry_and_subject() {
        let codec = codec();
        let token = codec.issue_refresh("a@x.com").unwrap();

        assert!(codec.is_valid(&token, "a@x.com"));
        assert!(!codec.is_valid(&token, "b@x.com"));

        let expired = expired_codec().issue_refresh("a@x.com").unwrap();
        assert!(!codec.is_valid(&expired, "a@x.com"));

        let mut tampered = token.clone();
        tampered.pop();
        assert!(!codec.is_valid(&tampered, "a@x.com"));
    }

    #[test]
    fn access_ttl_millis_reports_configuration() {
        assert_eq!(codec().access_ttl_millis(), 15 * 60 * 1000);
    }
}
