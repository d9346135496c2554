//! Account roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Category of account that determines its default capabilities.
///
/// The set is closed: anything outside it is rejected when parsed or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Individual content creator
    Creator,
    /// Talent agency representing creators
    Agency,
    /// Brand or business running campaigns
    Business,
    /// Campaign manager working on behalf of an agency or business
    Manager,
    /// Platform administrator
    Admin,
}

impl Role {
    /// Returns the wire name of the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_common::Role;
    ///
    /// assert_eq!(Role::Agency.as_str(), "agency");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Agency => "agency",
            Self::Business => "business",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns all roles as a slice.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Creator,
            Self::Agency,
            Self::Business,
            Self::Manager,
            Self::Admin,
        ]
    }

    /// Human-readable label for role switchers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Creator => "Creator",
            Self::Agency => "Agency",
            Self::Business => "Business",
            Self::Manager => "Manager",
            Self::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}
