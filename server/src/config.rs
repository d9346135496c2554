//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::permissions::{RolePermissionTable, TableError};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// JSON file replacing the built-in role permission table (optional)
    pub permission_table_path: Option<PathBuf>,

    /// Maximum accepted request body size in bytes (default: 64KB)
    pub max_body_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            permission_table_path: env::var("PERMISSION_TABLE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_body_size: match env::var("MAX_BODY_SIZE") {
                Ok(v) => v.parse().context("MAX_BODY_SIZE must be a byte count")?,
                Err(_) => 64 * 1024,
            },
        })
    }

    /// Build the role permission table this configuration asks for.
    ///
    /// Falls back to the built-in table when no file is configured.
    pub fn load_permission_table(&self) -> Result<RolePermissionTable, TableError> {
        match &self.permission_table_path {
            Some(path) => RolePermissionTable::load(path),
            None => Ok(RolePermissionTable::builtin()),
        }
    }

    /// Configuration for tests: loopback address and the built-in table.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            permission_table_path: None,
            max_body_size: 64 * 1024,
        }
    }
}
