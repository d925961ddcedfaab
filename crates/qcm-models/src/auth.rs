//! Authentication payloads and responses.

use qcm_auth::{Claims, Role};
use qcm_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::validate_username;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(
            min = 4,
            max = 20,
            message = "Le nom d'utilisateur doit contenir entre 4 et 20 caractères"
        ),
        custom(function = "validate_username")
    )]
    #[schema(example = "alice_01")]
    pub username: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Email invalide"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 5, message = "Le mot de passe doit contenir au moins 5 caractères"))]
    pub password: String,
    #[serde(rename = "confirmPassword", deserialize_with = "deserialize_trimmed")]
    #[validate(must_match(
        other = "password",
        message = "Les mots de passe ne correspondent pas"
    ))]
    pub confirm_password: String,
    /// Defaults to `user`
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Email invalide"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 5, message = "Le mot de passe doit contenir au moins 5 caractères"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// The caller's identity as carried by their token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for MeResponse {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            email: claims.email,
            role: claims.role,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}
