//! Well-known role names and the typed [`Role`] carried in access tokens.
//!
//! These must match the CHECK constraint on `users.role`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PREPARER: &str = "preparer";
pub const ROLE_RECEIVER: &str = "receiver";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PREPARER, ROLE_RECEIVER];

/// The role an authenticated caller acts under.
///
/// `Preparer` is the kitchen, `Receiver` is front-of-house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Preparer,
    Receiver,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Preparer => ROLE_PREPARER,
            Role::Receiver => ROLE_RECEIVER,
        }
    }

    /// Whether this role is contained in a route's allow-list.
    pub fn is_one_of(self, allowed: &[Role]) -> bool {
        allowed.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_PREPARER => Ok(Role::Preparer),
            ROLE_RECEIVER => Ok(Role::Receiver),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_valid_role() {
        for name in VALID_ROLES {
            let role: Role = name.parse().expect("valid role should parse");
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn rejects_unknown_role() {
        let result = "manager".parse::<Role>();
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("manager"));
    }

    #[test]
    fn role_is_case_sensitive() {
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Role::Preparer).unwrap();
        assert_eq!(json, "\"preparer\"");
        let back: Role = serde_json::from_str("\"receiver\"").unwrap();
        assert_eq!(back, Role::Receiver);
    }

    #[test]
    fn allow_list_membership() {
        assert!(Role::Admin.is_one_of(&[Role::Preparer, Role::Admin]));
        assert!(!Role::Receiver.is_one_of(&[Role::Preparer, Role::Admin]));
    }
}
