//! Dashboard permissions.
//!
//! Permissions are organized into categories:
//! - Analytics (bits 0-2): Dashboard and metrics access
//! - Creators (bits 3-4): Creator roster access
//! - Campaigns (bits 5-8): Campaign lifecycle
//! - Organizations (bits 9-12): Organization, team and billing management
//! - Platform (bits 13-15): Administrative actions

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Atomic capability gating access to a dashboard feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View the main dashboard and KPI cards
    ViewDashboard,
    /// View analytics charts
    ViewAnalytics,
    /// Export analytics data
    ExportAnalytics,
    /// View creator lists and profiles
    ViewCreators,
    /// Add, edit or remove creators from a roster
    ManageCreators,
    /// View campaigns
    ViewCampaigns,
    /// Create new campaigns
    CreateCampaign,
    /// Edit existing campaigns
    EditCampaign,
    /// Delete campaigns
    DeleteCampaign,
    /// View organization cards
    ViewOrganizations,
    /// Edit organization details
    ManageOrganization,
    /// Invite and remove team members
    ManageTeam,
    /// Manage billing and subscriptions
    ManageBilling,
    /// View the platform audit log
    ViewAuditLog,
    /// Manage platform user accounts
    ManageUsers,
    /// Manage platform settings
    ManageSettings,
}

impl Permission {
    /// Returns the action name used on the wire and in logs.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_common::Permission;
    ///
    /// assert_eq!(Permission::EditCampaign.action_name(), "edit_campaign");
    /// ```
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewAnalytics => "view_analytics",
            Self::ExportAnalytics => "export_analytics",
            Self::ViewCreators => "view_creators",
            Self::ManageCreators => "manage_creators",
            Self::ViewCampaigns => "view_campaigns",
            Self::CreateCampaign => "create_campaign",
            Self::EditCampaign => "edit_campaign",
            Self::DeleteCampaign => "delete_campaign",
            Self::ViewOrganizations => "view_organizations",
            Self::ManageOrganization => "manage_organization",
            Self::ManageTeam => "manage_team",
            Self::ManageBilling => "manage_billing",
            Self::ViewAuditLog => "view_audit_log",
            Self::ManageUsers => "manage_users",
            Self::ManageSettings => "manage_settings",
        }
    }

    /// Returns all permissions in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ViewDashboard,
            Self::ViewAnalytics,
            Self::ExportAnalytics,
            Self::ViewCreators,
            Self::ManageCreators,
            Self::ViewCampaigns,
            Self::CreateCampaign,
            Self::EditCampaign,
            Self::DeleteCampaign,
            Self::ViewOrganizations,
            Self::ManageOrganization,
            Self::ManageTeam,
            Self::ManageBilling,
            Self::ViewAuditLog,
            Self::ManageUsers,
            Self::ManageSettings,
        ]
    }

    /// Returns a human-readable description of the permission.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "View the dashboard overview",
            Self::ViewAnalytics => "View analytics charts",
            Self::ExportAnalytics => "Export analytics data",
            Self::ViewCreators => "View creators",
            Self::ManageCreators => "Manage creator rosters",
            Self::ViewCampaigns => "View campaigns",
            Self::CreateCampaign => "Create campaigns",
            Self::EditCampaign => "Edit campaigns",
            Self::DeleteCampaign => "Delete campaigns",
            Self::ViewOrganizations => "View organizations",
            Self::ManageOrganization => "Manage organization details",
            Self::ManageTeam => "Manage team members",
            Self::ManageBilling => "Manage billing",
            Self::ViewAuditLog => "View the audit log",
            Self::ManageUsers => "Manage platform users",
            Self::ManageSettings => "Manage platform settings",
        }
    }

    /// Single-bit set holding only this permission.
    #[must_use]
    pub const fn bit(self) -> PermissionSet {
        match self {
            Self::ViewDashboard => PermissionSet::VIEW_DASHBOARD,
            Self::ViewAnalytics => PermissionSet::VIEW_ANALYTICS,
            Self::ExportAnalytics => PermissionSet::EXPORT_ANALYTICS,
            Self::ViewCreators => PermissionSet::VIEW_CREATORS,
            Self::ManageCreators => PermissionSet::MANAGE_CREATORS,
            Self::ViewCampaigns => PermissionSet::VIEW_CAMPAIGNS,
            Self::CreateCampaign => PermissionSet::CREATE_CAMPAIGN,
            Self::EditCampaign => PermissionSet::EDIT_CAMPAIGN,
            Self::DeleteCampaign => PermissionSet::DELETE_CAMPAIGN,
            Self::ViewOrganizations => PermissionSet::VIEW_ORGANIZATIONS,
            Self::ManageOrganization => PermissionSet::MANAGE_ORGANIZATION,
            Self::ManageTeam => PermissionSet::MANAGE_TEAM,
            Self::ManageBilling => PermissionSet::MANAGE_BILLING,
            Self::ViewAuditLog => PermissionSet::VIEW_AUDIT_LOG,
            Self::ManageUsers => PermissionSet::MANAGE_USERS,
            Self::ManageSettings => PermissionSet::MANAGE_SETTINGS,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.action_name() == s)
            .ok_or_else(|| Error::UnknownPermission(s.to_string()))
    }
}

bitflags! {
    /// Set of permissions represented as a 64-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PermissionSet: u64 {
        // === Analytics (bits 0-2) ===
        const VIEW_DASHBOARD      = 1 << 0;
        const VIEW_ANALYTICS      = 1 << 1;
        const EXPORT_ANALYTICS    = 1 << 2;

        // === Creators (bits 3-4) ===
        const VIEW_CREATORS       = 1 << 3;
        const MANAGE_CREATORS     = 1 << 4;

        // === Campaigns (bits 5-8) ===
        const VIEW_CAMPAIGNS      = 1 << 5;
        const CREATE_CAMPAIGN     = 1 << 6;
        const EDIT_CAMPAIGN       = 1 << 7;
        const DELETE_CAMPAIGN     = 1 << 8;

        // === Organizations (bits 9-12) ===
        const VIEW_ORGANIZATIONS  = 1 << 9;
        const MANAGE_ORGANIZATION = 1 << 10;
        const MANAGE_TEAM         = 1 << 11;
        const MANAGE_BILLING      = 1 << 12;

        // === Platform (bits 13-15) ===
        const VIEW_AUDIT_LOG      = 1 << 13;
        const MANAGE_USERS        = 1 << 14;
        const MANAGE_SETTINGS     = 1 << 15;
    }
}

impl PermissionSet {
    // === Preset Combinations ===

    /// Default grants for creators: read-only access to their own dashboard.
    pub const CREATOR_DEFAULT: Self = Self::VIEW_DASHBOARD
        .union(Self::VIEW_ANALYTICS)
        .union(Self::VIEW_CAMPAIGNS)
        .union(Self::VIEW_ORGANIZATIONS);

    /// Default grants for agencies: creator access plus roster and campaign work.
    pub const AGENCY_DEFAULT: Self = Self::CREATOR_DEFAULT
        .union(Self::EXPORT_ANALYTICS)
        .union(Self::VIEW_CREATORS)
        .union(Self::MANAGE_CREATORS)
        .union(Self::CREATE_CAMPAIGN)
        .union(Self::EDIT_CAMPAIGN)
        .union(Self::MANAGE_TEAM);

    /// Default grants for businesses running their own campaigns.
    pub const BUSINESS_DEFAULT: Self = Self::VIEW_DASHBOARD
        .union(Self::VIEW_ANALYTICS)
        .union(Self::EXPORT_ANALYTICS)
        .union(Self::VIEW_CREATORS)
        .union(Self::VIEW_CAMPAIGNS)
        .union(Self::CREATE_CAMPAIGN)
        .union(Self::VIEW_ORGANIZATIONS)
        .union(Self::MANAGE_ORGANIZATION)
        .union(Self::MANAGE_BILLING);

    /// Default grants for campaign managers.
    pub const MANAGER_DEFAULT: Self = Self::VIEW_DASHBOARD
        .union(Self::VIEW_ANALYTICS)
        .union(Self::VIEW_CREATORS)
        .union(Self::VIEW_CAMPAIGNS)
        .union(Self::EDIT_CAMPAIGN)
        .union(Self::MANAGE_TEAM);

    /// Check if this set includes every permission in `other`.
    #[must_use]
    pub const fn has(self, other: Self) -> bool {
        self.contains(other)
    }

    /// Check if this set grants a single permission.
    #[must_use]
    pub const fn grants(self, permission: Permission) -> bool {
        self.contains(permission.bit())
    }

    /// Build a set from any collection of permissions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_common::{Permission, PermissionSet};
    ///
    /// let set = PermissionSet::from_permissions([Permission::ViewDashboard, Permission::ViewDashboard]);
    /// assert_eq!(set.permissions(), vec![Permission::ViewDashboard]);
    /// ```
    pub fn from_permissions<I>(permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        permissions
            .into_iter()
            .fold(Self::empty(), |acc, p| acc.union(p.bit()))
    }

    /// Expand the set back into permissions, in declaration order.
    #[must_use]
    pub fn permissions(self) -> Vec<Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(|p| self.grants(*p))
            .collect()
    }
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        permission.bit()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self::from_permissions(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_are_snake_case() {
        for perm in Permission::all() {
            let name = perm.action_name();
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "Action name '{name}' should be snake_case"
            );
        }
    }

    #[test]
    fn test_each_permission_has_a_distinct_bit() {
        let mut seen = PermissionSet::empty();
        for perm in Permission::all() {
            let bit = perm.bit();
            assert_eq!(bit.bits().count_ones(), 1, "{perm:?} should map to one bit");
            assert!(!seen.intersects(bit), "{perm:?} shares a bit");
            seen |= bit;
        }
        assert_eq!(seen, PermissionSet::all());
    }

    #[test]
    fn test_parse_round_trips_action_name() {
        for perm in Permission::all() {
            assert_eq!(perm.action_name().parse::<Permission>().unwrap(), *perm);
        }
        assert_eq!(
            "fly_plane".parse::<Permission>().unwrap_err(),
            Error::UnknownPermission("fly_plane".into())
        );
    }

    #[test]
    fn test_serde_matches_action_name() {
        for perm in Permission::all() {
            let json = serde_json::to_string(perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.action_name()));
        }
    }

    #[test]
    fn test_descriptions_are_not_empty() {
        for perm in Permission::all() {
            assert!(!perm.description().is_empty(), "{perm:?} lacks a description");
        }
    }

    #[test]
    fn test_from_permissions_deduplicates() {
        let set = PermissionSet::from_permissions([
            Permission::EditCampaign,
            Permission::ViewCampaigns,
            Permission::EditCampaign,
        ]);
        assert_eq!(
            set.permissions(),
            vec![Permission::ViewCampaigns, Permission::EditCampaign]
        );
    }

    #[test]
    fn test_grants_and_has() {
        let set: PermissionSet = [Permission::ViewDashboard, Permission::ManageTeam]
            .into_iter()
            .collect();
        assert!(set.grants(Permission::ManageTeam));
        assert!(!set.grants(Permission::ManageBilling));
        assert!(set.has(PermissionSet::VIEW_DASHBOARD | PermissionSet::MANAGE_TEAM));
        assert!(!set.has(PermissionSet::VIEW_DASHBOARD | PermissionSet::MANAGE_BILLING));
    }

    #[test]
    fn test_agency_extends_creator() {
        assert!(PermissionSet::AGENCY_DEFAULT.has(PermissionSet::CREATOR_DEFAULT));
    }

    #[test]
    fn test_presets_exclude_platform_permissions() {
        let platform = PermissionSet::VIEW_AUDIT_LOG
            | PermissionSet::MANAGE_USERS
            | PermissionSet::MANAGE_SETTINGS;
        for preset in [
            PermissionSet::CREATOR_DEFAULT,
            PermissionSet::AGENCY_DEFAULT,
            PermissionSet::BUSINESS_DEFAULT,
            PermissionSet::MANAGER_DEFAULT,
        ] {
            assert!(!preset.intersects(platform));
        }
    }

    #[test]
    fn test_default_is_empty() {
        assert!(PermissionSet::default().is_empty());
        assert!(PermissionSet::default().permissions().is_empty());
    }
}
