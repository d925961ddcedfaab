//! Attributes of the `token` cookie.
//!
//! In production the cookie is sent cross-site (`SameSite=None`), which
//! browsers only accept together with `Secure`. Elsewhere it is `Lax` and
//! works over plain HTTP.

use std::env;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub production: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            production: env::var("ENVIRONMENT")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }

    pub fn same_site(&self) -> SameSite {
        if self.production {
            SameSite::None
        } else {
            SameSite::Lax
        }
    }

    pub fn secure(&self) -> bool {
        self.production
    }
}
