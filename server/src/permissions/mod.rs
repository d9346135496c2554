//! Role-based permission system.
//!
//! Three layers, leaf to root:
//! - Table: static role to permission mapping
//! - Evaluator / context: pure checks for a role list or a user profile
//! - Gate: render decisions built on the context

pub mod context;
pub mod evaluator;
pub mod gate;
pub mod table;

pub use context::ProfilePermissions;
pub use gate::{
    with_permission, AccessNotice, GateDecision, GateOptions, GateOutcome, Gated, PermissionGate,
    ACCESS_NOTICE_TITLE,
};
pub use table::{RolePermissionTable, TableError};
