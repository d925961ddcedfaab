//! # QCM Auth
//!
//! Authentication and authorization logic for the QCM API. Nothing in this
//! crate touches HTTP or the database: the axum middleware in the main crate
//! feeds request data in and turns the results into responses.
//!
//! - [`claims`]: identity embedded in a token
//! - [`jwt`]: token issuance and verification
//! - [`roles`]: the fixed role hierarchy
//! - [`policy`]: role-set and ownership-or-admin access policies
//!
//! # Example
//!
//! ```ignore
//! use qcm_auth::{Identity, OwnershipPolicy, Role, issue_token, verify_token};
//! use qcm_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(&Identity {
//!     id: 7,
//!     username: "alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     role: Role::Creator,
//! }, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! OwnershipPolicy::SELF_OR_ADMIN.evaluate(&claims, Some("7"))?;
//! ```

pub mod claims;
pub mod jwt;
pub mod policy;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity};
pub use jwt::{TokenError, issue_token, issue_token_at, verify_token};
pub use policy::{AccessDenied, OwnershipPolicy, RolePolicy, is_same_user};
pub use roles::{Role, UnknownRole, is_at_least, rank_of};
