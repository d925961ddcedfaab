use std::sync::Arc;

use qcm_config::{AccountConfig, CookieConfig, CorsConfig, JwtConfig};
use qcm_db::Store;

/// Shared, read-only state cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub account_config: AccountConfig,
}

impl AppState {
    /// Builds the state around `store`, reading the rest from the environment.
    pub fn from_env(store: Arc<dyn Store>) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            jwt_config: JwtConfig::from_env()?,
            cookie_config: CookieConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            account_config: AccountConfig::from_env(),
        })
    }
}
