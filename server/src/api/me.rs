//! Current User Permissions API
//!
//! Everything the dashboard needs to decide what to render for the signed-in
//! user. Role state comes from the [`AuthContext`] of the request.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use pulse_common::{Permission, Role};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::auth::{AuthContext, ShellView};
use crate::permissions::{AccessNotice, GateDecision, GateOptions, PermissionGate};

/// Upper bound on permissions accepted in one check request.
const MAX_CHECKED_PERMISSIONS: usize = 64;

/// Page shell response.
#[derive(Debug, Serialize)]
pub struct ShellResponse {
    pub view: ShellView,
    pub authenticated: bool,
}

/// Which page shell to show.
///
/// GET /api/me/shell
pub async fn get_shell(auth: AuthContext) -> Json<ShellResponse> {
    Json(ShellResponse {
        view: auth.shell(),
        authenticated: auth.is_authenticated(),
    })
}

/// Role state and permission summary of the current user.
#[derive(Debug, Serialize)]
pub struct MyPermissionsResponse {
    pub active_role: Option<Role>,
    pub roles: Vec<Role>,
    /// Union over every held role, used for navigation.
    pub permissions: Vec<Permission>,
    /// Permissions of the active role alone.
    pub active_role_only: Vec<Permission>,
}

/// Summarize the current user's permissions.
///
/// GET /api/me/permissions
pub async fn get_my_permissions(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Json<MyPermissionsResponse> {
    let perms = auth.permissions(&state.table);
    let profile = perms.profile();

    Json(MyPermissionsResponse {
        active_role: profile.effective_active_role(),
        roles: profile.roles().to_vec(),
        permissions: perms.get_active_role_permissions().permissions(),
        active_role_only: perms.active_role_only_permissions().permissions(),
    })
}

/// Batch permission check request.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub permissions: Vec<Permission>,
}

/// Batch permission check response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Per permission, whether the active role grants it.
    pub can: BTreeMap<Permission, bool>,
    /// Per permission, whether any held role grants it.
    pub can_any: BTreeMap<Permission, bool>,
    /// The active role grants all requested permissions.
    pub can_all: bool,
    /// One single held role grants all requested permissions.
    pub can_any_all: bool,
}

/// Check a batch of permissions for the current user.
///
/// POST /api/me/permissions/check
pub async fn check_permissions(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<CheckRequest>,
) -> ApiResult<Json<CheckResponse>> {
    if body.permissions.len() > MAX_CHECKED_PERMISSIONS {
        return Err(ApiError::Validation(format!(
            "at most {MAX_CHECKED_PERMISSIONS} permissions per check"
        )));
    }

    let perms = auth.permissions(&state.table);

    Ok(Json(CheckResponse {
        can: body
            .permissions
            .iter()
            .map(|p| (*p, perms.can(*p)))
            .collect(),
        can_any: body
            .permissions
            .iter()
            .map(|p| (*p, perms.can_any(*p)))
            .collect(),
        can_all: perms.can_all(&body.permissions),
        can_any_all: perms.can_any_all(&body.permissions),
    }))
}

/// Gate evaluation request. Mirrors the gate's configuration surface.
#[derive(Debug, Deserialize)]
pub struct GateRequest {
    pub permission: Permission,
    #[serde(default)]
    pub show_message: bool,
    #[serde(default)]
    pub check_any_role: bool,
    /// Whether the client has a fallback view for this gate.
    #[serde(default)]
    pub has_fallback: bool,
}

/// Gate evaluation response.
#[derive(Debug, Serialize)]
pub struct GateResponse {
    pub decision: GateDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<AccessNotice>,
}

/// Evaluate a permission gate for the current user.
///
/// POST /api/me/gate
pub async fn evaluate_gate(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(body): Json<GateRequest>,
) -> Json<GateResponse> {
    let gate = PermissionGate::with_options(
        body.permission,
        GateOptions {
            fallback: body.has_fallback.then_some(()),
            show_message: body.show_message,
            check_any_role: body.check_any_role,
        },
    );

    let decision = gate.decide(&auth.permissions(&state.table));
    let notice = match decision {
        GateDecision::Restricted => gate.notice(),
        _ => None,
    };

    Json(GateResponse { decision, notice })
}
