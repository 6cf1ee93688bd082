use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Request-scoped principal established from a valid bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
    pub role: auth::Role,
}

/// Middleware that resolves the bearer token into a principal.
///
/// Runs once per request, before route dispatch. A missing, malformed,
/// expired, or tampered token never fails here: the request simply
/// proceeds anonymous, and the access policy turns that into a 401/403
/// where the route requires a principal.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&req) {
        match state.authenticator.token_codec().validate(token) {
            Ok(claims) => match (claims.role, claims.user_id) {
                (Some(role), Some(user_id)) => {
                    req.extensions_mut().insert(CurrentUser {
                        user_id: UserId(user_id),
                        email: claims.sub,
                        role,
                    });
                }
                // A refresh token presented as a bearer credential: valid
                // signature, wrong kind. Stays anonymous.
                _ => {
                    tracing::debug!("Bearer token lacks role/userId claims");
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "Discarding invalid bearer token");
            }
        }
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
