//! User schema - Identities and their roles

use serde::{Deserialize, Serialize};

/// Role of a user. Fixed and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Triages, assigns and accepts work
    Manager,
    /// Fixes defects assigned to them
    Engineer,
    /// Read-only access
    Observer,
}

impl Role {
    /// Human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Engineer => "Engineer",
            Role::Observer => "Observer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Manager => write!(f, "manager"),
            Role::Engineer => write!(f, "engineer"),
            Role::Observer => write!(f, "observer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "engineer" => Ok(Role::Engineer),
            "observer" => Ok(Role::Observer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: u64,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        User {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!(serde_json::to_string(&Role::Engineer).unwrap(), "\"engineer\"");
        assert_eq!(serde_json::to_string(&Role::Observer).unwrap(), "\"observer\"");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("observer".parse::<Role>().unwrap(), Role::Observer);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_full_name() {
        let user = User::new(3, "li@example.com", "Li", "Wei", Role::Observer);
        assert_eq!(user.full_name(), "Li Wei");
    }
}
