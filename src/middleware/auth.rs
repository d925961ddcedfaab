use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use qcm_auth::{Claims, verify_token};
use qcm_core::AppError;
use tracing::{debug, warn};

use crate::middleware::session::TOKEN_COOKIE;
use crate::state::AppState;

pub const NO_TOKEN_MESSAGE: &str = "Aucun token fourni";
pub const INVALID_TOKEN_MESSAGE: &str = "Token invalide";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Non authentifié";
pub const ALREADY_AUTHENTICATED_MESSAGE: &str = "Vous êtes déjà connecté.";

/// Verified claims of the caller, stored in the request extensions by
/// [`authenticate`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid session token; on success the claims
/// become available to later layers and handlers as [`CurrentUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session_token(&jar) else {
        debug!(path = %req.uri().path(), "No session token");
        return Err(AppError::unauthorized(NO_TOKEN_MESSAGE));
    };

    let claims = verify_token(token, &state.jwt_config).map_err(|e| {
        warn!(error = %e, "Session token rejected");
        AppError::unauthorized(INVALID_TOKEN_MESSAGE)
    })?;

    req.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(req).await)
}

/// Lets the request through only when the caller has no valid session.
/// A missing, expired or forged token counts as "not authenticated".
pub async fn check_not_authenticated(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(&jar) {
        if let Ok(claims) = verify_token(token, &state.jwt_config) {
            debug!(user_id = claims.id, "Caller already has a session");
            return Err(AppError::conflict(ALREADY_AUTHENTICATED_MESSAGE));
        }
    }

    Ok(next.run(req).await)
}

/// Extractor for handlers that need the caller's identity.
///
/// Uses the claims left by [`authenticate`] and falls back to verifying the
/// cookie itself on routes without that layer.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(CurrentUser(claims)) = parts.extensions.get::<CurrentUser>() {
            return Ok(AuthUser(claims.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        session_token(&jar)
            .and_then(|token| verify_token(token, &state.jwt_config).ok())
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED_MESSAGE))
    }
}
