//! Role to permission mapping.
//!
//! The table is built once at startup, either from the built-in presets or
//! from a JSON file, and is read-only afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pulse_common::{Permission, PermissionSet, Role};
use thiserror::Error;

/// Errors raised while loading a permission table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("Failed to read permission table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table file is not valid JSON of the expected shape.
    #[error("Invalid permission table: {0}")]
    Parse(#[from] serde_json::Error),

    /// The table names a role or permission outside the closed sets.
    #[error("Invalid permission table: {0}")]
    Unknown(#[from] pulse_common::Error),
}

/// Static mapping from role to granted permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionTable {
    grants: HashMap<Role, PermissionSet>,
}

impl RolePermissionTable {
    /// Table with the built-in grants for every role.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_grants([
            (Role::Creator, PermissionSet::CREATOR_DEFAULT),
            (Role::Agency, PermissionSet::AGENCY_DEFAULT),
            (Role::Business, PermissionSet::BUSINESS_DEFAULT),
            (Role::Manager, PermissionSet::MANAGER_DEFAULT),
            (Role::Admin, PermissionSet::all()),
        ])
    }

    /// Build a table from explicit grants. Later entries for the same role win.
    pub fn from_grants<I>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, PermissionSet)>,
    {
        Self {
            grants: grants.into_iter().collect(),
        }
    }

    /// Parse a table from JSON of the form `{ "<role>": ["<permission>", ...] }`.
    ///
    /// Roles absent from the document grant nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_common::{Permission, Role};
    /// use pulse_server::permissions::RolePermissionTable;
    ///
    /// let table = RolePermissionTable::from_json(r#"{"creator": ["view_dashboard"]}"#).unwrap();
    /// assert!(table.has_permission(Role::Creator, Permission::ViewDashboard));
    /// assert!(!table.has_permission(Role::Admin, Permission::ViewDashboard));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;

        let mut grants = HashMap::with_capacity(raw.len());
        for (role, permissions) in raw {
            let role: Role = role.parse()?;
            let set = permissions
                .iter()
                .map(|name| name.parse::<Permission>())
                .collect::<Result<PermissionSet, _>>()?;
            grants.insert(role, set);
        }

        Ok(Self { grants })
    }

    /// Read and parse a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), roles = table.len(), "Loaded permission table");
        Ok(table)
    }

    /// Permissions granted to `role`. Roles without an entry get the empty set.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> PermissionSet {
        self.grants.get(&role).copied().unwrap_or_default()
    }

    /// Roles with an entry in the table, in declaration order.
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        Role::all()
            .iter()
            .copied()
            .filter(|role| self.grants.contains_key(role))
            .collect()
    }

    /// Number of roles with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_covers_every_role() {
        let table = RolePermissionTable::builtin();
        assert_eq!(table.roles(), Role::all().to_vec());
        assert_eq!(table.len(), Role::all().len());
    }

    #[test]
    fn test_builtin_admin_has_everything() {
        let table = RolePermissionTable::builtin();
        assert_eq!(table.permissions_for(Role::Admin), PermissionSet::all());
    }

    #[test]
    fn test_missing_role_grants_nothing() {
        let table = RolePermissionTable::from_grants([(Role::Creator, PermissionSet::CREATOR_DEFAULT)]);
        assert!(table.permissions_for(Role::Agency).is_empty());
        assert_eq!(table.roles(), vec![Role::Creator]);
    }

    #[test]
    fn test_from_json() {
        let table = RolePermissionTable::from_json(
            r#"{"manager": ["edit_campaign", "view_campaigns"], "creator": []}"#,
        )
        .unwrap();
        assert_eq!(
            table.permissions_for(Role::Manager).permissions(),
            vec![Permission::ViewCampaigns, Permission::EditCampaign]
        );
        assert!(table.permissions_for(Role::Creator).is_empty());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_role() {
        let err = RolePermissionTable::from_json(r#"{"owner": ["view_dashboard"]}"#).unwrap_err();
        assert!(matches!(
            err,
            TableError::Unknown(pulse_common::Error::UnknownRole(ref name)) if name == "owner"
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_permission() {
        let err = RolePermissionTable::from_json(r#"{"creator": ["teleport"]}"#).unwrap_err();
        assert!(matches!(
            err,
            TableError::Unknown(pulse_common::Error::UnknownPermission(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = RolePermissionTable::from_json(r#"["creator"]"#).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"business": ["manage_billing"]}}"#).unwrap();

        let table = RolePermissionTable::load(file.path()).unwrap();
        assert!(table
            .permissions_for(Role::Business)
            .grants(Permission::ManageBilling));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RolePermissionTable::load("/nonexistent/pulse/permissions.json").unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
