//! The role hierarchy.
//!
//! Roles form a fixed total order given by their position in
//! [`Role::HIERARCHY`]; a lower index is more privileged. A role satisfies a
//! requirement when it is at least as privileged as the required role, so a
//! route open to `Creator` also admits `Admin`.
//!
//! Role strings read from tokens are untrusted. A string that names no role
//! has no rank and satisfies no requirement; it is never treated as
//! privileged.
//!
//! ```text
//! Admin    (rank 0)
//!   ↓
//! Creator  (rank 1)
//!   ↓
//! User     (rank 2)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Creator,
    #[default]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Most privileged first.
    pub const HIERARCHY: [Role; 3] = [Role::Admin, Role::Creator, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Creator => "creator",
            Role::User => "user",
        }
    }

    /// Position in [`Role::HIERARCHY`].
    pub fn rank(self) -> usize {
        match self {
            Role::Admin => 0,
            Role::Creator => 1,
            Role::User => 2,
        }
    }

    pub fn is_at_least(self, required: Role) -> bool {
        self.rank() <= required.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::HIERARCHY
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Rank of a role string, `None` if it names no role.
pub fn rank_of(role: &str) -> Option<usize> {
    role.parse::<Role>().ok().map(Role::rank)
}

/// Whether the role string `actual` satisfies `required`.
pub fn is_at_least(actual: &str, required: Role) -> bool {
    rank_of(actual).is_some_and(|rank| rank <= required.rank())
}
