use anyhow::{Result, bail};
use std::env;

/// Tokens live exactly one hour after issuance.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_lifetime: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            bail!("JWT secret must not be empty");
        }

        Ok(Self {
            secret,
            token_lifetime: TOKEN_LIFETIME_SECS,
        })
    }

    pub fn from_env() -> Result<Self> {
        match env::var("JWT_SECRET") {
            Ok(secret) => Self::new(secret),
            Err(_) => bail!("JWT_SECRET must be set"),
        }
    }
}

// The secret must never show up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_is_one_hour() {
        let config = JwtConfig::new("s3cret").unwrap();
        assert_eq!(config.token_lifetime, 3600);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtConfig::new("").is_err());
        assert!(JwtConfig::new("   ").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value").unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-value"));
    }

    #[test]
    fn test_from_env_requires_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().is_err());
        });
        temp_env::with_var("JWT_SECRET", Some("from-env"), || {
            assert_eq!(JwtConfig::from_env().unwrap().secret, "from-env");
        });
    }
}
