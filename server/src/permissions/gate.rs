//! Conditional rendering behind a permission.
//!
//! A gate resolves to exactly one of four outcomes, in priority order:
//! 1. Granted: the permission check passes, children are rendered
//! 2. Fallback: a fallback view was supplied
//! 3. Restricted: `show_message` is set, a standard notice is rendered
//! 4. Hidden: nothing is rendered
//!
//! Gates hold no state. Every call re-evaluates against the profile it is given.

use pulse_common::Permission;
use serde::Serialize;

use super::context::ProfilePermissions;

/// Title of the standard access notice.
pub const ACCESS_NOTICE_TITLE: &str = "Access restricted";

const ACCESS_NOTICE_MESSAGE: &str = "You don't have permission to access this feature.";
const ANY_ROLE_SUFFIX: &str = " None of your roles have access to it.";

/// Which branch a gate takes, without the rendered content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Granted,
    Fallback,
    Restricted,
    Hidden,
}

/// Standard notice shown when access is denied and no fallback exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessNotice {
    pub title: &'static str,
    pub message: String,
}

impl AccessNotice {
    /// Build the notice. The any-role variant says that no held role has access.
    #[must_use]
    pub fn new(check_any_role: bool) -> Self {
        let mut message = ACCESS_NOTICE_MESSAGE.to_string();
        if check_any_role {
            message.push_str(ANY_ROLE_SUFFIX);
        }
        Self {
            title: ACCESS_NOTICE_TITLE,
            message,
        }
    }
}

/// Rendered result of a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// The gated children.
    Granted(T),
    /// The caller-supplied fallback view.
    Fallback(T),
    /// The standard access notice.
    Restricted(AccessNotice),
    /// Nothing.
    Hidden,
}

impl<T> GateOutcome<T> {
    #[must_use]
    pub const fn decision(&self) -> GateDecision {
        match self {
            Self::Granted(_) => GateDecision::Granted,
            Self::Fallback(_) => GateDecision::Fallback,
            Self::Restricted(_) => GateDecision::Restricted,
            Self::Hidden => GateDecision::Hidden,
        }
    }

    /// The rendered view, if any content was produced.
    pub fn into_view(self) -> Option<T> {
        match self {
            Self::Granted(view) | Self::Fallback(view) => Some(view),
            Self::Restricted(_) | Self::Hidden => None,
        }
    }
}

/// Gate configuration besides the permission itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOptions<T> {
    /// View rendered instead of the children when access is denied.
    pub fallback: Option<T>,
    /// Render the standard notice when denied and no fallback exists.
    pub show_message: bool,
    /// Check every held role instead of only the active one.
    pub check_any_role: bool,
}

impl<T> Default for GateOptions<T> {
    fn default() -> Self {
        Self {
            fallback: None,
            show_message: false,
            check_any_role: false,
        }
    }
}

/// Rendering boundary that shows its children only to profiles holding a permission.
///
/// # Examples
///
/// ```
/// use pulse_common::{Permission, Role, UserProfile};
/// use pulse_server::permissions::{GateOutcome, PermissionGate, ProfilePermissions, RolePermissionTable};
///
/// let table = RolePermissionTable::builtin();
/// let profile = UserProfile::new(Role::Creator, vec![Role::Creator, Role::Manager]).unwrap();
/// let perms = ProfilePermissions::new(&profile, &table);
///
/// let gate = PermissionGate::new(Permission::EditCampaign).check_any_role(true);
/// assert_eq!(gate.render(&perms, || "editor"), GateOutcome::Granted("editor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate<T> {
    permission: Permission,
    options: GateOptions<T>,
}

impl<T> PermissionGate<T> {
    #[must_use]
    pub fn new(permission: Permission) -> Self {
        Self::with_options(permission, GateOptions::default())
    }

    #[must_use]
    pub fn with_options(permission: Permission, options: GateOptions<T>) -> Self {
        Self {
            permission,
            options,
        }
    }

    #[must_use]
    pub fn fallback(mut self, fallback: T) -> Self {
        self.options.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn show_message(mut self, show_message: bool) -> Self {
        self.options.show_message = show_message;
        self
    }

    #[must_use]
    pub fn check_any_role(mut self, check_any_role: bool) -> Self {
        self.options.check_any_role = check_any_role;
        self
    }

    #[must_use]
    pub const fn permission(&self) -> Permission {
        self.permission
    }

    #[must_use]
    pub const fn options(&self) -> &GateOptions<T> {
        &self.options
    }

    /// Whether the permission check itself passes.
    #[must_use]
    pub fn is_granted(&self, perms: &ProfilePermissions<'_>) -> bool {
        if self.options.check_any_role {
            perms.can_any(self.permission)
        } else {
            perms.can(self.permission)
        }
    }

    /// Pick the branch for `perms` without rendering anything.
    #[must_use]
    pub fn decide(&self, perms: &ProfilePermissions<'_>) -> GateDecision {
        if self.is_granted(perms) {
            return GateDecision::Granted;
        }
        self.log_denied();

        if self.options.fallback.is_some() {
            GateDecision::Fallback
        } else if self.options.show_message {
            GateDecision::Restricted
        } else {
            GateDecision::Hidden
        }
    }

    fn log_denied(&self) {
        tracing::debug!(
            permission = %self.permission,
            check_any_role = self.options.check_any_role,
            "Permission gate denied"
        );
    }

    /// The notice this gate shows on denial, if it is configured to show one.
    #[must_use]
    pub fn notice(&self) -> Option<AccessNotice> {
        self.options
            .show_message
            .then(|| AccessNotice::new(self.options.check_any_role))
    }
}

impl<T: Clone> PermissionGate<T> {
    /// Render the gate. `children` is only invoked when access is granted.
    pub fn render<F>(&self, perms: &ProfilePermissions<'_>, children: F) -> GateOutcome<T>
    where
        F: FnOnce() -> T,
    {
        if self.is_granted(perms) {
            return GateOutcome::Granted(children());
        }
        self.log_denied();

        match &self.options.fallback {
            Some(fallback) => GateOutcome::Fallback(fallback.clone()),
            None if self.options.show_message => {
                GateOutcome::Restricted(AccessNotice::new(self.options.check_any_role))
            }
            None => GateOutcome::Hidden,
        }
    }
}

/// A component with a permission gate bound in front of it.
#[derive(Debug, Clone)]
pub struct Gated<C, T> {
    component: C,
    gate: PermissionGate<T>,
}

/// Wrap `component` so every render goes through a gate on `permission`.
///
/// # Examples
///
/// ```
/// use pulse_common::{Permission, UserProfile};
/// use pulse_server::permissions::{with_permission, GateOptions, GateOutcome, ProfilePermissions, RolePermissionTable};
///
/// let billing = with_permission(
///     |plan: &str| format!("plan: {plan}"),
///     Permission::ManageBilling,
///     GateOptions { show_message: true, ..GateOptions::default() },
/// );
///
/// let table = RolePermissionTable::builtin();
/// let anonymous = UserProfile::empty();
/// let outcome = billing.render(&ProfilePermissions::new(&anonymous, &table), "pro");
/// assert!(matches!(outcome, GateOutcome::Restricted(_)));
/// ```
pub fn with_permission<C, T>(
    component: C,
    permission: Permission,
    options: GateOptions<T>,
) -> Gated<C, T> {
    Gated {
        component,
        gate: PermissionGate::with_options(permission, options),
    }
}

impl<C, T: Clone> Gated<C, T> {
    /// Render the wrapped component with `props`, or whatever the gate substitutes.
    pub fn render<P>(&self, perms: &ProfilePermissions<'_>, props: P) -> GateOutcome<T>
    where
        C: Fn(P) -> T,
    {
        self.gate.render(perms, || (self.component)(props))
    }

    #[must_use]
    pub const fn gate(&self) -> &PermissionGate<T> {
        &self.gate
    }
}
