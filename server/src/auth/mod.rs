//! Authentication Context
//!
//! Resolves the current user's role state from the request and decides which
//! page shell to show.

mod context;
mod error;

pub use context::{AuthContext, ShellView, ACTIVE_ROLE_HEADER, ROLES_HEADER};
pub use error::{AuthError, AuthResult, ErrorResponse};
