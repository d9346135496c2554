//! Request authentication context.
//!
//! The identity gateway in front of this service authenticates the user and
//! forwards their role state in two headers:
//! - `x-active-role`: the role currently in effect
//! - `x-roles`: comma-separated list of every held role
//!
//! A request with neither header is anonymous.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use pulse_common::{Role, UserProfile};
use serde::Serialize;

use super::error::{AuthError, AuthResult};
use crate::permissions::{ProfilePermissions, RolePermissionTable};

/// Header carrying the active role.
pub const ACTIVE_ROLE_HEADER: &str = "x-active-role";

/// Header carrying the comma-separated role list.
pub const ROLES_HEADER: &str = "x-roles";

static ANONYMOUS: UserProfile = UserProfile::empty();

/// Top-level page shell to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellView {
    /// Login screen for anonymous visitors.
    Login,
    /// Main application layout.
    Main,
}

/// Authentication state of the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    profile: Option<UserProfile>,
}

impl AuthContext {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { profile: None }
    }

    #[must_use]
    pub const fn signed_in(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    /// Login screen until a profile is present, main layout afterwards.
    #[must_use]
    pub const fn shell(&self) -> ShellView {
        if self.is_authenticated() {
            ShellView::Main
        } else {
            ShellView::Login
        }
    }

    /// Permission checks for this user. Anonymous users are denied everything.
    #[must_use]
    pub fn permissions<'a>(&'a self, table: &'a RolePermissionTable) -> ProfilePermissions<'a> {
        ProfilePermissions::new(self.profile.as_ref().unwrap_or(&ANONYMOUS), table)
    }

    /// Build the context from forwarded role headers.
    pub fn from_headers(headers: &HeaderMap) -> AuthResult<Self> {
        let active_role = header_str(headers, ACTIVE_ROLE_HEADER)?
            .map(str::parse::<Role>)
            .transpose()?;

        let roles = header_str(headers, ROLES_HEADER)?
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::parse::<Role>)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .filter(|roles| !roles.is_empty());

        if active_role.is_none() && roles.is_none() {
            return Ok(Self::anonymous());
        }

        Ok(Self::signed_in(UserProfile { active_role, roles }))
    }
}

/// Trimmed, non-empty header value.
fn header_str<'h>(headers: &'h HeaderMap, name: &'static str) -> AuthResult<Option<&'h str>> {
    headers
        .get(name)
        .map(|value| value.to_str().map_err(|_| AuthError::InvalidHeader(name)))
        .transpose()
        .map(|value| value.map(str::trim).filter(|v| !v.is_empty()))
}

/// Extractor for the auth context in handlers.
///
/// ```ignore
/// async fn handler(auth: AuthContext) -> impl IntoResponse {
///     Json(auth.shell())
/// }
/// ```
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = Self::from_headers(&parts.headers)?;
        if let Some(profile) = auth.profile() {
            tracing::debug!(
                active_role = ?profile.active_role,
                roles = ?profile.roles(),
                "Resolved request profile"
            );
        }
        Ok(auth)
    }
}
