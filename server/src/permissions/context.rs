//! Permission checks bound to a user profile.

use pulse_common::{Permission, PermissionSet, Role, UserProfile};

use super::table::RolePermissionTable;

/// Permission view of one profile against one table.
///
/// Cheap to build; construct one per render or request rather than caching it,
/// so role switches are picked up immediately.
#[derive(Debug, Clone, Copy)]
pub struct ProfilePermissions<'a> {
    profile: &'a UserProfile,
    table: &'a RolePermissionTable,
}

impl<'a> ProfilePermissions<'a> {
    #[must_use]
    pub fn new(profile: &'a UserProfile, table: &'a RolePermissionTable) -> Self {
        if let Err(e) = profile.validate() {
            tracing::warn!(error = %e, "Profile violates role invariants, denying active-role checks");
        }
        Self { profile, table }
    }

    #[must_use]
    pub const fn profile(&self) -> &'a UserProfile {
        self.profile
    }

    /// Check `permission` against the active role only.
    ///
    /// Denied when there is no active role in effect.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.profile
            .effective_active_role()
            .is_some_and(|role| self.table.has_permission(role, permission))
    }

    /// Check `permission` against every role the profile holds.
    #[must_use]
    pub fn can_any(&self, permission: Permission) -> bool {
        self.table
            .has_any_permission(self.profile.roles(), permission)
    }

    /// Check that the active role grants every one of `permissions`.
    ///
    /// An empty list passes only when an active role is in effect: the active
    /// role is set, the roles list is present, and it contains the active role.
    #[must_use]
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.profile.effective_active_role().is_some_and(|role| {
            permissions
                .iter()
                .all(|p| self.table.has_permission(role, *p))
        })
    }

    /// Check that a single held role grants every one of `permissions`.
    ///
    /// Grants are not combined across roles: `[creator, manager]` does not
    /// satisfy `[a, b]` if `a` only comes from creator and `b` only from manager.
    #[must_use]
    pub fn can_any_all(&self, permissions: &[Permission]) -> bool {
        self.profile.roles().iter().any(|role| {
            permissions
                .iter()
                .all(|p| self.table.has_permission(*role, *p))
        })
    }

    /// Union of the permissions of ALL held roles.
    ///
    /// Despite the name this is not limited to the active role. Dashboard
    /// navigation relies on seeing every reachable section; use
    /// [`ProfilePermissions::active_role_only_permissions`] for the strict view.
    #[must_use]
    pub fn get_active_role_permissions(&self) -> PermissionSet {
        self.table.get_all_user_permissions(self.profile.roles())
    }

    /// Permissions of the active role alone. Empty without an active role.
    #[must_use]
    pub fn active_role_only_permissions(&self) -> PermissionSet {
        self.profile
            .effective_active_role()
            .map(|role| self.table.permissions_for(role))
            .unwrap_or_default()
    }

    /// Check an arbitrary role, independent of the current profile.
    ///
    /// Used for "what would I see as ..." previews in the role switcher.
    #[must_use]
    pub fn role_has_permission(&self, role: Role, permission: Permission) -> bool {
        self.table.has_permission(role, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RolePermissionTable {
        RolePermissionTable::builtin()
    }

    fn creator_manager() -> UserProfile {
        UserProfile::new(Role::Creator, vec![Role::Creator, Role::Manager]).unwrap()
    }

    #[test]
    fn test_can_uses_active_role_only() {
        let table = table();
        let profile = creator_manager();
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(perms.can(Permission::ViewDashboard));
        assert!(!perms.can(Permission::EditCampaign));
        assert!(perms.can_any(Permission::EditCampaign));
    }

    #[test]
    fn test_can_without_active_role() {
        let table = table();
        let profile = UserProfile {
            active_role: None,
            roles: Some(vec![Role::Admin]),
        };
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(!perms.can(Permission::ViewDashboard));
        assert!(perms.can_any(Permission::ViewDashboard));
    }

    #[test]
    fn test_empty_profile_denies_everything() {
        let table = table();
        let profile = UserProfile::empty();
        let perms = ProfilePermissions::new(&profile, &table);

        for p in Permission::all() {
            assert!(!perms.can(*p));
            assert!(!perms.can_any(*p));
        }
        assert!(!perms.can_all(&[]));
        assert!(!perms.can_any_all(&[]));
        assert!(perms.get_active_role_permissions().is_empty());
    }

    #[test]
    fn test_active_role_not_held_fails_closed() {
        let table = table();
        let profile = UserProfile {
            active_role: Some(Role::Admin),
            roles: Some(vec![Role::Creator]),
        };
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(!perms.can(Permission::ViewDashboard));
        assert!(!perms.can_all(&[]));
        assert!(perms.can_any(Permission::ViewDashboard));
    }

    #[test]
    fn test_can_all_vacuous() {
        let table = table();
        let profile = creator_manager();
        assert!(ProfilePermissions::new(&profile, &table).can_all(&[]));

        let no_active = UserProfile {
            active_role: None,
            roles: Some(vec![Role::Creator]),
        };
        assert!(!ProfilePermissions::new(&no_active, &table).can_all(&[]));
    }

    #[test]
    fn test_can_all_vacuous_needs_roles_list() {
        let table = table();
        let profile = UserProfile {
            active_role: Some(Role::Agency),
            roles: None,
        };
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(!perms.can_all(&[]));
        assert!(!perms.can(Permission::ViewDashboard));
    }

    #[test]
    fn test_can_all_requires_every_permission() {
        let table = table();
        let profile = creator_manager();
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(perms.can_all(&[Permission::ViewDashboard, Permission::ViewCampaigns]));
        assert!(!perms.can_all(&[Permission::ViewDashboard, Permission::EditCampaign]));
    }

    #[test]
    fn test_can_any_all_does_not_aggregate_across_roles() {
        let table = table();
        let profile = creator_manager();
        let perms = ProfilePermissions::new(&profile, &table);

        // view_organizations comes only from creator, manage_team only from manager
        assert!(perms.can_any(Permission::ViewOrganizations));
        assert!(perms.can_any(Permission::ManageTeam));
        assert!(!perms.can_any_all(&[Permission::ViewOrganizations, Permission::ManageTeam]));

        // manager alone grants both
        assert!(perms.can_any_all(&[Permission::EditCampaign, Permission::ManageTeam]));
    }

    #[test]
    fn test_can_any_all_vacuous_needs_a_role() {
        let table = table();
        let profile = UserProfile {
            active_role: None,
            roles: Some(vec![Role::Business]),
        };
        assert!(ProfilePermissions::new(&profile, &table).can_any_all(&[]));
    }

    #[test]
    fn test_get_active_role_permissions_spans_all_roles() {
        let table = table();
        let profile = creator_manager();
        let perms = ProfilePermissions::new(&profile, &table);

        let all = perms.get_active_role_permissions();
        assert_eq!(
            all,
            PermissionSet::CREATOR_DEFAULT | PermissionSet::MANAGER_DEFAULT
        );
        assert!(all.grants(Permission::EditCampaign));
        assert_eq!(perms.active_role_only_permissions(), PermissionSet::CREATOR_DEFAULT);
    }

    #[test]
    fn test_role_has_permission_ignores_profile() {
        let table = table();
        let profile = UserProfile::empty();
        let perms = ProfilePermissions::new(&profile, &table);

        assert!(perms.role_has_permission(Role::Admin, Permission::ManageUsers));
        assert!(!perms.role_has_permission(Role::Creator, Permission::ManageUsers));
    }

    #[test]
    fn test_role_switch_is_picked_up() {
        let table = table();
        let mut profile = creator_manager();
        assert!(!ProfilePermissions::new(&profile, &table).can(Permission::EditCampaign));

        profile.active_role = Some(Role::Manager);
        assert!(ProfilePermissions::new(&profile, &table).can(Permission::EditCampaign));
    }
}
