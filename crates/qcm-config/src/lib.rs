//! # QCM Config
//!
//! Configuration types for the QCM API.
//!
//! Every structure is loaded from environment variables (a `.env` file is
//! read by the binary before any of these run):
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cookie`]: attributes of the `token` cookie
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL pool settings
//! - [`account`]: account creation rules
//!
//! # Example
//!
//! ```ignore
//! use qcm_config::{CookieConfig, CorsConfig, DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cookie_config = CookieConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod account;
pub mod cookie;
pub mod cors;
pub mod database;
pub mod jwt;

// Re-export commonly used types at crate root
pub use account::AccountConfig;
pub use cookie::{CookieConfig, SameSite};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::{JwtConfig, TOKEN_LIFETIME_SECS};

/// Reads a boolean flag: `true`/`1` (any case) is on, anything else is off.
pub(crate) fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
