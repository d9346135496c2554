//! Shared Types

pub mod permission;
pub mod role;
pub mod user;

pub use permission::{Permission, PermissionSet};
pub use role::Role;
pub use user::UserProfile;
