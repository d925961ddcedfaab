use anyhow::anyhow;
use qcm_auth::{AccessDenied, Claims};
use qcm_core::{AppError, spawn_hash_password, spawn_verify_password};
use qcm_db::Store;
use tracing::{info, instrument};

use super::model::{UpdateUserRequest, User, UserChanges};

pub const USER_NOT_FOUND_MESSAGE: &str = "Utilisateur non trouvé";

/// Outcome of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

impl UpdateOutcome {
    pub fn message(self) -> &'static str {
        match self {
            UpdateOutcome::Updated => "Utilisateur mis à jour avec succès",
            UpdateOutcome::Unchanged => "Aucune modification apportée",
        }
    }
}

pub struct UserService;

impl UserService {
    #[instrument(skip_all)]
    pub async fn get_users(store: &dyn Store) -> Result<Vec<User>, AppError> {
        let users = store.list_users().await?;
        if users.is_empty() {
            return Err(AppError::not_found(anyhow!("Aucun utilisateur trouvé")));
        }
        Ok(users)
    }

    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn Store, id: i64) -> Result<User, AppError> {
        store
            .find_user_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)))
    }

    /// Applies the requested changes to user `id` on behalf of `caller`.
    ///
    /// Only admins may change a role. A password change needs both the old
    /// and the new password, and the old one must match.
    #[instrument(skip(store, caller, dto), fields(caller_id = caller.id))]
    pub async fn update_user(
        store: &dyn Store,
        caller: &Claims,
        id: i64,
        dto: UpdateUserRequest,
    ) -> Result<UpdateOutcome, AppError> {
        let user = store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)))?;

        let mut changes = UserChanges::default();

        if let Some(role) = dto.role.filter(|role| role.as_str() != user.role) {
            if !caller.is_admin() {
                return Err(AppError::forbidden(AccessDenied::AdminRequired.to_string()));
            }
            changes.role = Some(role);
        }

        if let Some(username) = dto.username.filter(|username| *username != user.username) {
            if store.find_user_by_username(&username).await?.is_some() {
                return Err(AppError::validation(
                    "username",
                    "Nom d'utilisateur déjà utilisé",
                ));
            }
            changes.username = Some(username);
        }

        if let Some(email) = dto.email.filter(|email| *email != user.email) {
            if store.find_user_by_email(&email).await?.is_some() {
                return Err(AppError::validation("email", "Email déjà utilisé"));
            }
            changes.email = Some(email);
        }

        if let (Some(old_password), Some(new_password)) = (dto.old_password, dto.new_password) {
            if !spawn_verify_password(old_password, user.password_hash.clone()).await? {
                return Err(AppError::unauthorized("L'ancien mot de passe est incorrect"));
            }
            changes.password_hash = Some(spawn_hash_password(new_password).await?);
        }

        if changes.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }

        match store.update_user(id, &changes).await {
            Ok(0) => Err(AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE))),
            Ok(_) => {
                info!(user_id = id, "User updated");
                Ok(UpdateOutcome::Updated)
            }
            Err(e) if e.is_unique_violation() => Err(AppError::bad_request(anyhow!(
                "Nom d'utilisateur ou email déjà utilisé"
            ))),
            Err(e) => Err(AppError::internal(e)),
        }
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &dyn Store, id: i64) -> Result<(), AppError> {
        if store.delete_user(id).await? == 0 {
            return Err(AppError::not_found(anyhow!(USER_NOT_FOUND_MESSAGE)));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
