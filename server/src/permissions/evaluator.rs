//! Permission evaluation.
//!
//! Pure lookups against a [`RolePermissionTable`]. Nothing here errors:
//! missing data always evaluates to "denied".

use pulse_common::{Permission, PermissionSet, Role};

use super::table::RolePermissionTable;

impl RolePermissionTable {
    /// Check if `role` is granted `permission`.
    ///
    /// Roles without a table entry are denied.
    #[must_use]
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.permissions_for(role).grants(permission)
    }

    /// Check if at least one of `roles` is granted `permission`.
    #[must_use]
    pub fn has_any_permission(&self, roles: &[Role], permission: Permission) -> bool {
        roles
            .iter()
            .any(|role| self.has_permission(*role, permission))
    }

    /// Union of the permissions granted to all `roles`.
    #[must_use]
    pub fn get_all_user_permissions(&self, roles: &[Role]) -> PermissionSet {
        roles
            .iter()
            .fold(PermissionSet::empty(), |acc, role| {
                acc | self.permissions_for(*role)
            })
    }
}
