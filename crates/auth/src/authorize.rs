use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PermissionInfo, Role};

/// Roles and permissions granted to a principal, as aggregated by the realm.
///
/// Both sets are always present; a principal with no grants has two empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationInfo {
    pub roles: HashSet<Role>,
    pub permissions: HashSet<PermissionInfo>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing role '{0}'")]
    MissingRole(String),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl AuthorizationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_role(&mut self, role: Role) {
        self.roles.insert(role);
    }

    pub fn add_permission(&mut self, permission: PermissionInfo) {
        self.permissions.insert(permission);
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == role)
    }

    pub fn has_all_roles<'a>(&self, roles: impl IntoIterator<Item = &'a str>) -> bool {
        roles.into_iter().all(|r| self.has_role(r))
    }

    /// Whether any granted permission implies `required`.
    pub fn is_permitted(&self, required: &PermissionInfo) -> bool {
        self.permissions.iter().any(|p| p.implies(required))
    }

    /// Sorted role names, for logs and audit output.
    pub fn sorted_roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.roles.iter().map(Role::as_str).collect();
        roles.sort_unstable();
        roles
    }

    /// Sorted permission strings, for logs and audit output.
    pub fn sorted_permissions(&self) -> Vec<&str> {
        let mut perms: Vec<&str> = self.permissions.iter().map(PermissionInfo::as_str).collect();
        perms.sort_unstable();
        perms
    }
}

/// Require `role`.
pub fn check_role(info: &AuthorizationInfo, role: &str) -> Result<(), AuthzError> {
    if info.has_role(role) {
        Ok(())
    } else {
        Err(AuthzError::MissingRole(role.to_string()))
    }
}

/// Require a grant implying `required`.
///
/// - No IO
/// - No panics
pub fn check_permission(
    info: &AuthorizationInfo,
    required: &PermissionInfo,
) -> Result<(), AuthzError> {
    if info.is_permitted(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
