//! Administrative commands run outside the HTTP server.

use anyhow::{Context, anyhow};
use qcm_auth::Role;
use qcm_core::spawn_hash_password;
use qcm_db::Store;
use qcm_models::{NewUser, SignUpRequest};
use validator::Validate;

/// Creates an admin account directly in the store.
///
/// Public sign-up refuses the admin role, so this is how the first admin
/// comes to exist. The same username, email and password rules apply.
pub async fn create_admin(
    store: &dyn Store,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let request = SignUpRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.trim().to_string(),
        confirm_password: password.trim().to_string(),
        role: Role::Admin,
    };
    request
        .validate()
        .map_err(|errors| anyhow!("invalid admin account: {errors}"))?;

    let password_hash = spawn_hash_password(request.password)
        .await
        .map_err(|e| e.error)
        .context("failed to hash password")?;

    let admin = NewUser {
        username: request.username,
        email: request.email,
        password_hash,
        role: Role::Admin,
    };

    match store.insert_user(&admin).await {
        Ok(id) => Ok(id),
        Err(e) if e.is_unique_violation() => {
            Err(anyhow!("a user with this username or email already exists"))
        }
        Err(e) => Err(e.into()),
    }
}
