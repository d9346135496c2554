//! Error types for the shared model.

use thiserror::Error;

use crate::types::Role;

/// Errors raised at the boundary where untyped data becomes roles, permissions or profiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Role name is not part of the closed role set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Permission name is not part of the closed permission set.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// A profile must hold at least one role.
    #[error("Profile must hold at least one role")]
    EmptyRoles,

    /// The active role is not one of the roles the profile holds.
    #[error("Active role {0} is not held by the profile")]
    ActiveRoleNotHeld(Role),
}

/// Result alias using the shared [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
