//! Access policies applied after a token has been verified.
//!
//! Two independent policies exist, chosen per route:
//!
//! - [`RolePolicy`]: the caller's role must be at least one of the allowed
//!   roles.
//! - [`OwnershipPolicy`]: the caller must own the target resource or be an
//!   admin, with an optional admin-only switch that overrides self access.

use thiserror::Error;

use crate::claims::Claims;
use crate::roles::{Role, is_at_least};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Accès non autorisé")]
    RoleNotAllowed,
    #[error("Forbidden: Admin access only")]
    AdminRequired,
    #[error("Forbidden: Insufficient permissions")]
    InsufficientPermissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    allowed: &'static [Role],
}

impl RolePolicy {
    /// Any authenticated user with a recognized role.
    pub const ANY_USER: Self = Self::new(&[Role::User]);
    pub const CREATORS: Self = Self::new(&[Role::Creator]);
    pub const ADMINS: Self = Self::new(&[Role::Admin]);

    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &'static [Role] {
        self.allowed
    }

    pub fn evaluate(&self, caller: &Claims) -> Result<(), AccessDenied> {
        if self
            .allowed
            .iter()
            .any(|required| is_at_least(&caller.role, *required))
        {
            Ok(())
        } else {
            Err(AccessDenied::RoleNotAllowed)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipPolicy {
    pub require_admin: bool,
    pub allow_self: bool,
}

impl Default for OwnershipPolicy {
    fn default() -> Self {
        Self::SELF_OR_ADMIN
    }
}

impl OwnershipPolicy {
    pub const ADMIN_ONLY: Self = Self::new(true, false);
    pub const SELF_OR_ADMIN: Self = Self::new(false, true);

    pub const fn new(require_admin: bool, allow_self: bool) -> Self {
        Self {
            require_admin,
            allow_self,
        }
    }

    /// Decides access to the resource named by `target_id` (the `{id}` route
    /// segment, if the route has one).
    ///
    /// The admin requirement is checked first so that admin-only routes
    /// reject non-admins even on their own resource.
    pub fn evaluate(&self, caller: &Claims, target_id: Option<&str>) -> Result<(), AccessDenied> {
        let is_admin = caller.is_admin();

        if self.require_admin && !is_admin {
            return Err(AccessDenied::AdminRequired);
        }

        if self.allow_self && target_id.is_none_or(|target| is_same_user(target, caller.id)) {
            return Ok(());
        }

        if is_admin {
            return Ok(());
        }

        Err(AccessDenied::InsufficientPermissions)
    }
}

/// Ids are compared as numbers: `"007"` names user 7, `"7a"` names nobody.
pub fn is_same_user(target_id: &str, caller_id: i64) -> bool {
    target_id
        .parse::<i64>()
        .is_ok_and(|target| target == caller_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i64, role: &str) -> Claims {
        Claims {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            role: role.to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn test_role_policy_admits_higher_roles() {
        let policy = RolePolicy::CREATORS;
        assert!(policy.evaluate(&caller(1, "admin")).is_ok());
        assert!(policy.evaluate(&caller(1, "creator")).is_ok());
        assert_eq!(
            policy.evaluate(&caller(1, "user")),
            Err(AccessDenied::RoleNotAllowed)
        );
    }

    #[test]
    fn test_role_policy_any_of_several() {
        let policy = RolePolicy::new(&[Role::Admin, Role::User]);
        assert!(policy.evaluate(&caller(1, "user")).is_ok());
        assert!(policy.evaluate(&caller(1, "creator")).is_ok());
    }

    #[test]
    fn test_role_policy_empty_rejects_everyone() {
        let policy = RolePolicy::new(&[]);
        assert!(policy.evaluate(&caller(1, "admin")).is_err());
    }

    #[test]
    fn test_role_policy_unknown_role_rejected() {
        assert_eq!(
            RolePolicy::ANY_USER.evaluate(&caller(1, "superadmin")),
            Err(AccessDenied::RoleNotAllowed)
        );
    }

    #[test]
    fn test_admin_requirement_dominates_self_access() {
        let policy = OwnershipPolicy::new(true, true);
        assert_eq!(
            policy.evaluate(&caller(5, "user"), Some("5")),
            Err(AccessDenied::AdminRequired)
        );
        assert!(policy.evaluate(&caller(1, "admin"), Some("5")).is_ok());
    }

    #[test]
    fn test_self_or_admin() {
        let policy = OwnershipPolicy::default();
        assert!(policy.evaluate(&caller(5, "user"), Some("5")).is_ok());
        assert_eq!(
            policy.evaluate(&caller(5, "user"), Some("6")),
            Err(AccessDenied::InsufficientPermissions)
        );
        assert!(policy.evaluate(&caller(1, "admin"), Some("6")).is_ok());
    }

    #[test]
    fn test_self_without_target_is_allowed() {
        assert!(
            OwnershipPolicy::SELF_OR_ADMIN
                .evaluate(&caller(5, "creator"), None)
                .is_ok()
        );
    }

    #[test]
    fn test_admin_only_listing() {
        let policy = OwnershipPolicy::ADMIN_ONLY;
        assert_eq!(
            policy.evaluate(&caller(5, "creator"), None),
            Err(AccessDenied::AdminRequired)
        );
        assert!(policy.evaluate(&caller(1, "admin"), None).is_ok());
    }

    #[test]
    fn test_no_self_no_admin_rejects() {
        let policy = OwnershipPolicy::new(false, false);
        assert_eq!(
            policy.evaluate(&caller(5, "user"), Some("5")),
            Err(AccessDenied::InsufficientPermissions)
        );
        assert!(policy.evaluate(&caller(1, "admin"), Some("5")).is_ok());
    }

    #[test]
    fn test_ids_compare_numerically() {
        assert!(is_same_user("7", 7));
        assert!(is_same_user("007", 7));
        assert!(!is_same_user("7a", 7));
        assert!(!is_same_user("70", 7));
        assert!(!is_same_user("", 7));
    }

    #[test]
    fn test_non_numeric_target_only_admin_passes() {
        let policy = OwnershipPolicy::SELF_OR_ADMIN;
        assert!(policy.evaluate(&caller(7, "user"), Some("seven")).is_err());
        assert!(policy.evaluate(&caller(1, "admin"), Some("seven")).is_ok());
    }
}
