use chrono::Utc;
use qcm_auth::{Identity, Role, TokenError, issue_token, issue_token_at, verify_token};
use qcm_config::{JwtConfig, TOKEN_LIFETIME_SECS};

fn config() -> JwtConfig {
    JwtConfig::new("unit-test-secret").unwrap()
}

fn identity(role: Role) -> Identity {
    Identity {
        id: 42,
        username: "quizmaster".to_string(),
        email: "quizmaster@example.com".to_string(),
        role,
    }
}

#[test]
fn test_round_trip_preserves_identity() {
    let config = config();
    let token = issue_token(&identity(Role::Creator), &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.id, 42);
    assert_eq!(claims.username, "quizmaster");
    assert_eq!(claims.email, "quizmaster@example.com");
    assert_eq!(claims.role(), Some(Role::Creator));
}

#[test]
fn test_lifetime_is_one_hour() {
    let config = config();
    let issued_at = Utc::now().timestamp();
    let token = issue_token_at(&identity(Role::User), issued_at, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.iat, issued_at);
    assert_eq!(claims.exp, issued_at + TOKEN_LIFETIME_SECS);
    assert_eq!(TOKEN_LIFETIME_SECS, 3600);
}

#[test]
fn test_expired_token_rejected() {
    let config = config();
    let two_hours_ago = Utc::now().timestamp() - 7200;
    let token = issue_token_at(&identity(Role::Admin), two_hours_ago, &config).unwrap();

    assert!(matches!(
        verify_token(&token, &config),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_other_secret_rejected() {
    let token = issue_token(&identity(Role::User), &config()).unwrap();
    let other = JwtConfig::new("another-secret").unwrap();

    assert!(matches!(
        verify_token(&token, &other),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_garbage_rejected() {
    for garbage in ["", "abc", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30"] {
        assert!(
            matches!(verify_token(garbage, &config()), Err(TokenError::Malformed(_))),
            "{garbage:?} should be malformed"
        );
    }
}

#[test]
fn test_empty_secret_refused() {
    assert!(JwtConfig::new("").is_err());
    assert!(JwtConfig::new("   ").is_err());
}
