//! User rows and DTOs.

use chrono::{DateTime, Utc};
use qcm_auth::{Identity, Role};
use qcm_core::serde::deserialize_optional_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A full `users` row, including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// The identity a session token is issued for, `None` if the stored
    /// role is not a known role.
    pub fn identity(&self) -> Option<Identity> {
        Some(Identity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.parse().ok()?,
        })
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Usernames are limited to ASCII letters, digits and underscores.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset").with_message(
            "Le nom d'utilisateur ne peut contenir que des lettres, chiffres et underscores"
                .into(),
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        length(
            min = 4,
            max = 20,
            message = "Le nom d'utilisateur doit contenir entre 4 et 20 caractères"
        ),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(email(message = "Email invalide"))]
    pub email: Option<String>,
    #[serde(
        default,
        rename = "oldPassword",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    pub old_password: Option<String>,
    #[serde(
        default,
        rename = "newPassword",
        deserialize_with = "deserialize_optional_trimmed"
    )]
    #[validate(length(
        min = 5,
        message = "Le mot de passe doit contenir au moins 5 caractères"
    ))]
    pub new_password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Data for inserting a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Column changes for a user update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }
}
