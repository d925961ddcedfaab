//! Authorization middleware.
//!
//! Both layers expect [`authenticate`](crate::middleware::auth::authenticate)
//! to have run first and answer 401 when it has not. Their state is the
//! policy itself, so each route group picks its own:
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/", post(create_quiz))
//!     .route_layer(middleware::from_fn_with_state(RolePolicy::CREATORS, authorize_roles))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State, rejection::PathRejection},
    middleware::Next,
    response::Response,
};
use qcm_auth::{AccessDenied, Claims, OwnershipPolicy, RolePolicy};
use qcm_core::AppError;
use tracing::debug;

use crate::middleware::auth::{CurrentUser, NOT_AUTHENTICATED_MESSAGE};

/// Route parameter naming the resource an ownership check is about.
pub const TARGET_PARAM: &str = "id";

fn current_user(req: &Request) -> Result<&Claims, AppError> {
    req.extensions()
        .get::<CurrentUser>()
        .map(|CurrentUser(claims)| claims)
        .ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED_MESSAGE))
}

fn denied(caller: &Claims, reason: AccessDenied) -> AppError {
    debug!(user_id = caller.id, role = %caller.role, reason = %reason, "Access denied");
    AppError::forbidden(reason.to_string())
}

/// Passes when the caller's role is at least one of the policy's roles.
pub async fn authorize_roles(
    State(policy): State<RolePolicy>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = current_user(&req)?;
    policy
        .evaluate(caller)
        .map_err(|reason| denied(caller, reason))?;

    Ok(next.run(req).await)
}

/// Passes when the caller owns the `{id}` resource or is an admin, as the
/// policy dictates. Routes without an `{id}` segment have no target.
pub async fn check_authorization(
    State(policy): State<OwnershipPolicy>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = current_user(&req)?;
    let target = params
        .as_ref()
        .ok()
        .and_then(|Path(params)| params.get(TARGET_PARAM))
        .map(String::as_str);

    policy
        .evaluate(caller, target)
        .map_err(|reason| denied(caller, reason))?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::{self, Next},
        routing::get,
    };
    use tower::ServiceExt;

    fn claims(id: i64, role: &str) -> Claims {
        Claims {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            role: role.to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    /// Stands in for `authenticate` by injecting fixed claims.
    async fn inject(State(claims): State<Option<Claims>>, mut req: Request, next: Next) -> Response {
        if let Some(claims) = claims {
            req.extensions_mut().insert(CurrentUser(claims));
        }
        next.run(req).await
    }

    fn ownership_app(policy: OwnershipPolicy, caller: Option<Claims>) -> Router {
        Router::new()
            .route("/users", get(|| async { "list" }))
            .route("/users/{id}", get(|| async { "one" }))
            .route_layer(middleware::from_fn_with_state(policy, check_authorization))
            .route_layer(middleware::from_fn_with_state(caller, inject))
    }

    fn roles_app(policy: RolePolicy, caller: Option<Claims>) -> Router {
        Router::new()
            .route("/quizzes", get(|| async { "quizzes" }))
            .route_layer(middleware::from_fn_with_state(policy, authorize_roles))
            .route_layer(middleware::from_fn_with_state(caller, inject))
    }

    async fn status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(HttpRequest::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = ownership_app(OwnershipPolicy::SELF_OR_ADMIN, None);
        assert_eq!(status(app, "/users/1").await, StatusCode::UNAUTHORIZED);

        let app = roles_app(RolePolicy::ANY_USER, None);
        assert_eq!(status(app, "/quizzes").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_self_or_admin_reads_id_param() {
        let policy = OwnershipPolicy::SELF_OR_ADMIN;
        let caller = Some(claims(5, "user"));

        assert_eq!(
            status(ownership_app(policy, caller.clone()), "/users/5").await,
            StatusCode::OK
        );
        assert_eq!(
            status(ownership_app(policy, caller.clone()), "/users/005").await,
            StatusCode::OK
        );
        assert_eq!(
            status(ownership_app(policy, caller), "/users/6").await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(ownership_app(policy, Some(claims(1, "admin"))), "/users/6").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_admin_only_without_target() {
        let policy = OwnershipPolicy::ADMIN_ONLY;
        assert_eq!(
            status(ownership_app(policy, Some(claims(5, "creator"))), "/users").await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(ownership_app(policy, Some(claims(1, "admin"))), "/users").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_role_policy_uses_hierarchy() {
        let policy = RolePolicy::CREATORS;
        assert_eq!(
            status(roles_app(policy, Some(claims(1, "admin"))), "/quizzes").await,
            StatusCode::OK
        );
        assert_eq!(
            status(roles_app(policy, Some(claims(2, "creator"))), "/quizzes").await,
            StatusCode::OK
        );
        assert_eq!(
            status(roles_app(policy, Some(claims(3, "user"))), "/quizzes").await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(roles_app(policy, Some(claims(4, "root"))), "/quizzes").await,
            StatusCode::FORBIDDEN
        );
    }
}
