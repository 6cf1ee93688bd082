use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// What a route prefix requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No principal needed.
    Public,
    /// Any authenticated principal.
    Authenticated,
    /// A principal whose role is in the set.
    AnyRole(&'static [Role]),
}

/// Outcome of a policy decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Non-public route, no principal (401).
    Unauthenticated,
    /// Principal present, role not in the requirement set (403).
    Forbidden,
}

/// Ordered route-prefix table, evaluated top to bottom, first match wins.
/// Requests matching no rule fall back to requiring authentication.
pub struct AccessPolicy {
    rules: Vec<(&'static str, Access)>,
    fallback: Access,
}

impl AccessPolicy {
    /// The service's route table.
    pub fn new() -> Self {
        Self {
            rules: vec![
                ("/api/auth", Access::Public),
                ("/api/users", Access::AnyRole(&[Role::Admin])),
                ("/api/tasks", Access::AnyRole(&[Role::Admin, Role::User])),
            ],
            fallback: Access::Authenticated,
        }
    }

    pub fn decide(&self, path: &str, principal: Option<&CurrentUser>) -> Decision {
        let access = self
            .rules
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix))
            .map(|(_, access)| *access)
            .unwrap_or(self.fallback);

        match access {
            Access::Public => Decision::Allow,
            Access::Authenticated => match principal {
                Some(_) => Decision::Allow,
                None => Decision::Unauthenticated,
            },
            Access::AnyRole(roles) => match principal {
                Some(user) if roles.contains(&user.role) => Decision::Allow,
                Some(_) => Decision::Forbidden,
                None => Decision::Unauthenticated,
            },
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware enforcing the access policy. Relies on `authenticate`
/// having run first to attach the principal, so it must be layered
/// inside it.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = req.extensions().get::<CurrentUser>();

    match state.policy.decide(req.uri().path(), principal) {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Unauthenticated => {
            Err(ApiError::Unauthorized("Authentication required".to_string()).into_response())
        }
        Decision::Forbidden => {
            Err(ApiError::Forbidden("Insufficient permissions".to_string()).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserId;

    fn principal(role: Role) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            email: "a@x.com".to_string(),
            role,
        }
    }

    #[test]
    fn auth_routes_are_public() {
        let policy = AccessPolicy::new();
        assert_eq!(policy.decide("/api/auth/login", None), Decision::Allow);
        assert_eq!(policy.decide("/api/auth/register", None), Decision::Allow);
    }

    #[test]
    fn user_routes_require_admin() {
        let policy = AccessPolicy::new();
        assert_eq!(policy.decide("/api/users", None), Decision::Unauthenticated);
        assert_eq!(
            policy.decide("/api/users", Some(&principal(Role::User))),
            Decision::Forbidden
        );
        assert_eq!(
            policy.decide("/api/users/123", Some(&principal(Role::Admin))),
            Decision::Allow
        );
    }

    #[test]
    fn task_routes_allow_both_roles() {
        let policy = AccessPolicy::new();
        assert_eq!(policy.decide("/api/tasks", None), Decision::Unauthenticated);
        assert_eq!(
            policy.decide("/api/tasks", Some(&principal(Role::User))),
            Decision::Allow
        );
        assert_eq!(
            policy.decide("/api/tasks/9", Some(&principal(Role::Admin))),
            Decision::Allow
        );
    }

    #[test]
    fn unmatched_routes_require_any_principal() {
        let policy = AccessPolicy::new();
        assert_eq!(
            policy.decide("/api/health", None),
            Decision::Unauthenticated
        );
        assert_eq!(
            policy.decide("/api/health", Some(&principal(Role::User))),
            Decision::Allow
        );
    }

    #[test]
    fn first_match_wins() {
        let policy = AccessPolicy::new();
        // "/api/auth" matches before the fallback even for deep paths.
        assert_eq!(
            policy.decide("/api/auth/refresh/extra", None),
            Decision::Allow
        );
    }
}
