use crate::env_flag;

/// Rules for public account creation.
#[derive(Clone, Debug, Default)]
pub struct AccountConfig {
    /// Whether `POST /api/auth/register` may create `admin` accounts.
    /// Off by default; admins are created with `qcm create-admin`.
    pub allow_admin_signup: bool,
}

impl AccountConfig {
    pub fn from_env() -> Self {
        Self {
            allow_admin_signup: env_flag("ALLOW_ADMIN_SIGNUP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_signup_flag() {
        temp_env::with_var("ALLOW_ADMIN_SIGNUP", Some("TRUE"), || {
            assert!(AccountConfig::from_env().allow_admin_signup);
        });
        temp_env::with_var("ALLOW_ADMIN_SIGNUP", Some("1"), || {
            assert!(AccountConfig::from_env().allow_admin_signup);
        });
        temp_env::with_var("ALLOW_ADMIN_SIGNUP", Some("yes"), || {
            assert!(!AccountConfig::from_env().allow_admin_signup);
        });
        temp_env::with_var_unset("ALLOW_ADMIN_SIGNUP", || {
            assert!(!AccountConfig::from_env().allow_admin_signup);
        });
    }
}
