//! The `token` session cookie.

use axum::http::{HeaderValue, header::InvalidHeaderValue};
use chrono::DateTime;
use qcm_config::CookieConfig;

pub const TOKEN_COOKIE: &str = "token";

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

fn http_date(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|at| at.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_else(|| EXPIRED.to_string())
}

fn cookie_attributes(cookie: &mut String, config: &CookieConfig) {
    cookie.push_str(&format!("; SameSite={}", config.same_site()));
    if config.secure() {
        cookie.push_str("; Secure");
    }
}

/// `Set-Cookie` value carrying `token` until `expires_at` (unix seconds).
pub fn session_cookie(
    token: &str,
    expires_at: i64,
    config: &CookieConfig,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; Expires={}",
        http_date(expires_at)
    );
    cookie_attributes(&mut cookie, config);
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn clear_session_cookie(config: &CookieConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; Expires={EXPIRED}");
    cookie_attributes(&mut cookie, config);
    HeaderValue::from_str(&cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVELOPMENT: CookieConfig = CookieConfig { production: false };
    const PRODUCTION: CookieConfig = CookieConfig { production: true };

    #[test]
    fn test_session_cookie_development() {
        let cookie = session_cookie("abc.def.ghi", 1_700_003_600, &DEVELOPMENT).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=abc.def.ghi; Path=/; HttpOnly; Expires=Tue, 14 Nov 2023 23:13:20 GMT; SameSite=Lax"
        );
    }

    #[test]
    fn test_session_cookie_production() {
        let cookie = session_cookie("abc", 1_700_003_600, &PRODUCTION).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.ends_with("; SameSite=None; Secure"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie(&DEVELOPMENT).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=; Path=/; HttpOnly; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Lax"
        );

        let cookie = clear_session_cookie(&PRODUCTION).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; SameSite=None; Secure"));
    }

    #[test]
    fn test_token_with_invalid_characters_is_rejected() {
        assert!(session_cookie("bad\ntoken", 0, &DEVELOPMENT).is_err());
    }
}
