//! Actions
//!
//! An action names a set of events a team cares about. Here an action
//! matches events by name; the stored match set is recomputed after each
//! seeding run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived action matching analytics events by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Numeric identifier assigned by the app store (0 until persisted)
    pub id: i64,
    /// Team this action belongs to
    pub team_id: i64,
    /// Display name (unique per team)
    pub name: String,
    /// Event name this action matches
    pub event_name: String,
    /// ID of the user who defined the action
    pub created_by: Option<String>,
    /// Timestamp when this action was created
    pub created_at: DateTime<Utc>,
}

impl Action {
    /// Create an unsaved action for a team
    pub fn new(team_id: i64, name: String, event_name: String) -> Self {
        Self {
            id: 0,
            team_id,
            name,
            event_name,
            created_by: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_action_starts_unsaved() {
        let action = Action::new(9, "Signed up".to_string(), "user signed up".to_string());
        assert_eq!(action.id, 0);
        assert_eq!(action.team_id, 9);
        assert_eq!(action.name, "Signed up");
        assert_eq!(action.event_name, "user signed up");
        assert!(action.created_by.is_none());
    }
}
