//! Quiz rows and DTOs.

use chrono::{DateTime, Utc};
use qcm_core::serde::{deserialize_optional_trimmed, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of quiz creation and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuizRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Le titre doit contenir entre 1 et 255 caractères"
    ))]
    #[schema(example = "Rust ownership basics")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(
        max = 2000,
        message = "La description ne peut pas dépasser 2000 caractères"
    ))]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedQuizResponse {
    pub message: String,
    #[serde(rename = "quizId")]
    pub quiz_id: i64,
}
