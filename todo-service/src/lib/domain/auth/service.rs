use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

/// Authentication coordinator.
///
/// Orchestrates registration, login, and refresh over the user store and
/// the stateless credential primitives. The three operations share no
/// mutable state beyond the store itself; uniqueness under concurrent
/// registration is the store's responsibility.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn session(&self, user: &User, access_token: String, refresh_token: String) -> AuthSession {
        AuthSession::bearer(
            access_token,
            refresh_token,
            self.authenticator.token_codec().access_ttl_millis(),
            user.email.as_str().to_string(),
            user.role,
        )
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if self
            .repository
            .exists_by_email(command.email.as_str())
            .await?
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        if command.password.as_str() != command.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;
        let user = User::register(command.username, command.email, password_hash);
        let user = self.repository.create(user).await?;

        let pair = self
            .authenticator
            .issue_token_pair(user.email.as_str(), user.role, user.id.0)
            .map_err(AuthError::TokenIssuance)?;

        tracing::info!(email = %user.email, "Account registered");

        Ok(self.session(&user, pair.access_token, pair.refresh_token))
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let pair = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.email.as_str(),
                user.role,
                user.id.0,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                AuthenticationError::Password(err) => AuthError::Password(err),
                AuthenticationError::Token(err) => AuthError::TokenIssuance(err),
            })?;

        Ok(self.session(&user, pair.access_token, pair.refresh_token))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let codec = self.authenticator.token_codec();

        let subject = codec
            .extract_subject(refresh_token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&subject)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(subject.clone()))?;

        if !codec.is_valid(refresh_token, &subject) {
            return Err(AuthError::InvalidRefreshToken);
        }

        // Claims are re-derived from the store: a role change since login
        // shows up in the next access token, not in the refresh token.
        let access_token = codec
            .issue_access(user.email.as_str(), user.role, user.id.0)
            .map_err(AuthError::TokenIssuance)?;

        Ok(self.session(&user, access_token, refresh_token.to_string()))
    }
}
