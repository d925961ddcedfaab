use axum::{Json, extract::State, http::StatusCode};
use qcm_core::{AppError, ErrorResponse};
use tracing::instrument;

use super::model::{CreatedQuizResponse, MessageResponse, Quiz, QuizRequest};
use super::service::QuizService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedId, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/quizzes",
    responses(
        (status = 200, description = "All quizzes", body = Vec<Quiz>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Unknown role", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Quizzes"
)]
#[instrument(skip_all)]
pub async fn get_quizzes(State(state): State<AppState>) -> Result<Json<Vec<Quiz>>, AppError> {
    let quizzes = QuizService::get_quizzes(state.store.as_ref()).await?;
    Ok(Json(quizzes))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(("id" = i64, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "The quiz", body = Quiz),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Quizzes"
)]
#[instrument(skip_all)]
pub async fn get_quiz(
    State(state): State<AppState>,
    ValidatedId(id): ValidatedId,
) -> Result<Json<Quiz>, AppError> {
    let quiz = QuizService::get_quiz(state.store.as_ref(), id).await?;
    Ok(Json(quiz))
}

/// Create a quiz owned by the caller (creator or admin)
#[utoipa::path(
    post,
    path = "/api/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 201, description = "Quiz created", body = CreatedQuizResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is below creator", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Quizzes"
)]
#[instrument(skip_all)]
pub async fn create_quiz(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<QuizRequest>,
) -> Result<(StatusCode, Json<CreatedQuizResponse>), AppError> {
    let quiz_id = QuizService::create_quiz(state.store.as_ref(), auth_user.id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedQuizResponse {
            message: "Quiz créé avec succès".to_string(),
            quiz_id,
        }),
    ))
}

/// Update one of the caller's quizzes
#[utoipa::path(
    put,
    path = "/api/quizzes/{id}",
    params(("id" = i64, Path, description = "Quiz id")),
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Updated quiz", body = Quiz),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is below creator", body = ErrorResponse),
        (status = 404, description = "Quiz not found or not the caller's", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Quizzes"
)]
#[instrument(skip_all)]
pub async fn update_quiz(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedId(id): ValidatedId,
    ValidatedJson(dto): ValidatedJson<QuizRequest>,
) -> Result<Json<Quiz>, AppError> {
    let quiz = QuizService::update_quiz(state.store.as_ref(), auth_user.id(), id, dto).await?;
    Ok(Json(quiz))
}

/// Delete one of the caller's quizzes
#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    params(("id" = i64, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is below creator", body = ErrorResponse),
        (status = 404, description = "Quiz not found or not the caller's", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Quizzes"
)]
#[instrument(skip_all)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedId(id): ValidatedId,
) -> Result<Json<MessageResponse>, AppError> {
    QuizService::delete_quiz(state.store.as_ref(), auth_user.id(), id).await?;
    Ok(Json(MessageResponse::new("Quiz supprimé avec succès")))
}
