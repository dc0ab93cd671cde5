//! Organizations and users
//!
//! The ownership chain above a team: an organization holds teams, a user
//! operates seeding runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization owning one or more teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier (UUID string)
    pub id: String,
    /// Display name
    pub name: String,
    /// Timestamp when this organization was created
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new organization with the given ID and name
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
        }
    }
}

/// User recorded as the operator of seeding runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID string)
    pub id: String,
    /// Email address (unique)
    pub email: String,
    /// First name shown in reports
    pub first_name: String,
    /// Timestamp when this user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given ID, email and first name
    pub fn new(id: String, email: String, first_name: String) -> Self {
        Self {
            id,
            email,
            first_name,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_organization_stamps_created_at() {
        let before = Utc::now();
        let org = Organization::new("org-1".to_string(), "Acme".to_string());
        assert_eq!(org.id, "org-1");
        assert_eq!(org.name, "Acme");
        assert!(org.created_at >= before);
    }

    #[test]
    fn new_user_keeps_identity_fields() {
        let user = User::new(
            "user-1".to_string(),
            "demo@example.com".to_string(),
            "Demo".to_string(),
        );
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.first_name, "Demo");
    }
}
