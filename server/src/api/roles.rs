//! Role Catalog API
//!
//! Read-only view of the role permission table, used by the role switcher to
//! preview what each role can do.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_common::{Permission, Role};
use serde::Serialize;

use super::error::{ApiError, ApiResult};
use crate::api::AppState;

/// One role and everything it grants.
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub label: &'static str,
    pub permissions: Vec<Permission>,
}

/// Result of checking one role against one permission.
#[derive(Debug, Serialize)]
pub struct RolePermissionCheck {
    pub role: Role,
    pub permission: Permission,
    pub granted: bool,
}

fn parse_role(name: &str) -> ApiResult<Role> {
    name.parse()
        .map_err(|_| ApiError::NotFound(format!("Role '{name}'")))
}

fn parse_permission(name: &str) -> ApiResult<Permission> {
    name.parse()
        .map_err(|_| ApiError::NotFound(format!("Permission '{name}'")))
}

fn summarize(state: &AppState, role: Role) -> RoleSummary {
    RoleSummary {
        role,
        label: role.label(),
        permissions: state.table.permissions_for(role).permissions(),
    }
}

/// List every role in the table with its permissions.
///
/// GET /api/roles
pub async fn list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    Json(
        state
            .table
            .roles()
            .into_iter()
            .map(|role| summarize(&state, role))
            .collect(),
    )
}

/// Permissions granted to one role.
///
/// GET /api/roles/{role}/permissions
pub async fn get_role_permissions(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<RoleSummary>> {
    let role = parse_role(&role)?;
    Ok(Json(summarize(&state, role)))
}

/// Whether one role grants one permission, regardless of the caller's roles.
///
/// GET /api/roles/{role}/permissions/{permission}
pub async fn check_role_permission(
    State(state): State<AppState>,
    Path((role, permission)): Path<(String, String)>,
) -> ApiResult<Json<RolePermissionCheck>> {
    let role = parse_role(&role)?;
    let permission = parse_permission(&permission)?;

    Ok(Json(RolePermissionCheck {
        role,
        permission,
        granted: state.table.has_permission(role, permission),
    }))
}
