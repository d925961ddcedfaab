//! Session token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user's id, username, email and
//! role. They expire [`qcm_config::TOKEN_LIFETIME_SECS`] after issuance and
//! are checked with zero clock leeway.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use qcm_config::JwtConfig;

use crate::claims::{Claims, Identity};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs a token for `identity`, issued now.
pub fn issue_token(identity: &Identity, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    issue_token_at(identity, Utc::now().timestamp(), jwt_config)
}

/// Signs a token for `identity` with an explicit issue time.
pub fn issue_token_at(
    identity: &Identity,
    issued_at: i64,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let claims = Claims {
        id: identity.id,
        username: identity.username.clone(),
        email: identity.email.clone(),
        role: identity.role.to_string(),
        iat: issued_at,
        exp: issued_at + jwt_config.token_lifetime,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig::new(secret).unwrap()
    }

    fn alice() -> Identity {
        Identity {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Creator,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let config = config("test_secret");
        let token = issue_token(&alice(), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "creator");
        assert_eq!(claims.exp - claims.iat, config.token_lifetime);
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = issue_token(&alice(), &config("test_secret")).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_expired_token() {
        let config = config("test_secret");
        let issued_at = Utc::now().timestamp() - 2 * config.token_lifetime;
        let token = issue_token_at(&alice(), issued_at, &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_near_expiry_is_still_valid() {
        let config = config("test_secret");
        let issued_at = Utc::now().timestamp() - config.token_lifetime + 30;
        let token = issue_token_at(&alice(), issued_at, &config).unwrap();

        assert!(verify_token(&token, &config).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_token(&alice(), &config("secret_one")).unwrap();
        assert!(matches!(
            verify_token(&token, &config("secret_two")),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let config = config("test_secret");
        let user_token = issue_token(&alice(), &config).unwrap();
        let admin_token = issue_token(
            &Identity {
                role: Role::Admin,
                ..alice()
            },
            &config,
        )
        .unwrap();

        let user_parts: Vec<&str> = user_token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert!(matches!(
            verify_token(&forged, &config),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_token() {
        let config = config("test_secret");
        assert!(matches!(
            verify_token("not-a-token", &config),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            verify_token("", &config),
            Err(TokenError::Malformed(_))
        ));
    }
}
