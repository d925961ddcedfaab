use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use qcm_core::{AppError, ErrorResponse};
use tracing::instrument;

use super::model::{MeResponse, MessageResponse, RegisterResponse, SignInRequest, SignUpRequest};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::middleware::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error or username/email taken", body = ErrorResponse),
        (status = 403, description = "Admin self-registration is disabled", body = ErrorResponse),
        (status = 409, description = "Caller is already logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user_id = AuthService::register(state.store.as_ref(), &state.account_config, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Utilisateur créé avec succès".to_string(),
            user_id,
        }),
    ))
}

/// Log in and receive the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Logged in, `token` cookie set", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 409, description = "Caller is already logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Response, AppError> {
    let session = AuthService::login(state.store.as_ref(), &state.jwt_config, dto).await?;
    let cookie = session_cookie(&session.token, session.expires_at, &state.cookie_config)
        .map_err(AppError::internal)?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("Connexion réussie")),
    )
        .into_response())
}

/// Log out by clearing the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let cookie = clear_session_cookie(&state.cookie_config).map_err(AppError::internal)?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("Déconnexion réussie")),
    )
        .into_response())
}

/// Identity of the logged-in caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Claims carried by the session token", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    Json(MeResponse::from(claims))
}
