//! Account roles
//!
//! Roles form a total order, `User < Educator < Admin`. A role satisfies
//! every requirement at or below itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can run predictions
    User,
    /// Can also export reports
    Educator,
    /// Can also manage accounts
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Educator, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Educator => "educator",
            Role::Admin => "admin",
        }
    }

    /// Whether this role meets `required`
    pub fn satisfies(&self, required: Role) -> bool {
        *self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AuthError::InvalidAccount(format!("unknown role '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Role::User < Role::Educator);
        assert!(Role::Educator < Role::Admin);
    }

    #[test]
    fn test_satisfies() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::Educator));
        assert!(Role::Admin.satisfies(Role::User));
        assert!(Role::Educator.satisfies(Role::User));
        assert!(!Role::Educator.satisfies(Role::Admin));
        assert!(!Role::User.satisfies(Role::Educator));
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("educator".parse::<Role>().unwrap(), Role::Educator);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
