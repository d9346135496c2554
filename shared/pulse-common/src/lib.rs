//! Pulse Common Library
//!
//! Role, permission and profile types shared by the dashboard server and its clients.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
