use anyhow::anyhow;
use chrono::Utc;
use qcm_auth::{AccessDenied, Role, issue_token_at};
use qcm_config::{AccountConfig, JwtConfig};
use qcm_core::{AppError, spawn_hash_password, spawn_verify_password};
use qcm_db::Store;
use qcm_models::NewUser;
use tracing::{info, instrument, warn};

use super::model::{Session, SignInRequest, SignUpRequest};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email ou mot de passe incorrect";
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "Nom d'utilisateur ou email déjà utilisé";

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(username = %dto.username, role = %dto.role))]
    pub async fn register(
        store: &dyn Store,
        account_config: &AccountConfig,
        dto: SignUpRequest,
    ) -> Result<i64, AppError> {
        if dto.role == Role::Admin && !account_config.allow_admin_signup {
            warn!("Admin self-registration refused");
            return Err(AppError::forbidden(AccessDenied::AdminRequired.to_string()));
        }

        let password_hash = spawn_hash_password(dto.password).await?;
        let new_user = NewUser {
            username: dto.username,
            email: dto.email,
            password_hash,
            role: dto.role,
        };

        match store.insert_user(&new_user).await {
            Ok(user_id) => {
                info!(user_id, "User registered");
                Ok(user_id)
            }
            Err(e) if e.is_unique_violation() => {
                Err(AppError::bad_request(anyhow!(DUPLICATE_ACCOUNT_MESSAGE)))
            }
            Err(e) => Err(AppError::internal(e)),
        }
    }

    /// Checks the credentials and issues a session token.
    ///
    /// An unknown email and a wrong password fail the same way.
    #[instrument(skip_all)]
    pub async fn login(
        store: &dyn Store,
        jwt_config: &JwtConfig,
        dto: SignInRequest,
    ) -> Result<Session, AppError> {
        let Some(user) = store.find_user_by_email(&dto.email).await? else {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        if !spawn_verify_password(dto.password, user.password_hash.clone()).await? {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let identity = user
            .identity()
            .ok_or_else(|| AppError::internal_error(format!("unknown stored role {:?}", user.role)))?;

        let issued_at = Utc::now().timestamp();
        let token = issue_token_at(&identity, issued_at, jwt_config).map_err(AppError::internal)?;

        info!(user_id = user.id, "User logged in");

        Ok(Session {
            token,
            expires_at: issued_at + jwt_config.token_lifetime,
        })
    }
}
