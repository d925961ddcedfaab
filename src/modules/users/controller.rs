use axum::{Json, extract::State};
use qcm_core::{AppError, ErrorResponse};
use tracing::instrument;

use super::model::{MessageResponse, UpdateUserRequest, User};
use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedId, ValidatedJson};

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "No users", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Get a user (self or admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(state.store.as_ref(), id).await?;
    Ok(Json(user))
}

/// Update a user (self or admin; role changes are admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated, or nothing to change", body = MessageResponse),
        (status = 400, description = "Validation error or username/email taken", body = ErrorResponse),
        (status = 401, description = "Missing/invalid token or wrong old password", body = ErrorResponse),
        (status = 403, description = "Not the caller's account, or role change by a non-admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedId(id): ValidatedId,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let outcome = UserService::update_user(state.store.as_ref(), &caller, id, dto).await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}

/// Delete a user and their quizzes (self or admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Utilisateur supprimé avec succès")))
}
