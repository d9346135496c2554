//! User Types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Role;

/// Role state of the authenticated account.
///
/// Both fields are optional on the wire. A missing field means "no access",
/// never "default access".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Role currently in effect for the UI.
    #[serde(default, alias = "active_role", skip_serializing_if = "Option::is_none")]
    pub active_role: Option<Role>,
    /// Every role the account holds, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl UserProfile {
    /// Create a validated profile.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_common::{Role, UserProfile};
    ///
    /// let profile = UserProfile::new(Role::Creator, vec![Role::Creator, Role::Manager]).unwrap();
    /// assert_eq!(profile.effective_active_role(), Some(Role::Creator));
    ///
    /// assert!(UserProfile::new(Role::Admin, vec![Role::Creator]).is_err());
    /// ```
    pub fn new(active_role: Role, roles: Vec<Role>) -> Result<Self> {
        let profile = Self {
            active_role: Some(active_role),
            roles: Some(roles),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile with no roles at all. Every check against it is denied.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            active_role: None,
            roles: None,
        }
    }

    /// Check the profile invariants for the fields that are present.
    ///
    /// A present roles list must be non-empty, and a present active role must
    /// be one of the held roles.
    pub fn validate(&self) -> Result<()> {
        if let Some(roles) = &self.roles {
            if roles.is_empty() {
                return Err(Error::EmptyRoles);
            }
            if let Some(active) = self.active_role {
                if !roles.contains(&active) {
                    return Err(Error::ActiveRoleNotHeld(active));
                }
            }
        }
        Ok(())
    }

    /// Roles held by the account, or an empty slice when unknown.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        self.roles.as_deref().unwrap_or_default()
    }

    /// The active role, if it is actually in effect.
    ///
    /// Requires both fields to be present and the active role to be held.
    #[must_use]
    pub fn effective_active_role(&self) -> Option<Role> {
        let active = self.active_role?;
        self.roles
            .as_ref()
            .filter(|roles| roles.contains(&active))
            .map(|_| active)
    }

    /// Whether the account holds more than one role and can switch between them.
    #[must_use]
    pub fn can_switch_roles(&self) -> bool {
        self.roles().len() > 1
    }
}
