//! Teams
//!
//! A team is the unit a dataset is seeded into: persons, events, groups and
//! actions all hang off a team ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project team receiving a seeded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Numeric identifier assigned by the app store (0 until persisted)
    pub id: i64,
    /// Owning organization ID
    pub organization_id: String,
    /// Display name
    pub name: String,
    /// Ingestion token (unique per team)
    pub api_token: String,
    /// Marks the team as holding demo data
    pub is_demo: bool,
    /// Whether at least one event has been ingested
    pub ingested_event: bool,
    /// Whether the snippet onboarding step is done
    pub completed_snippet_onboarding: bool,
    /// Timestamp when this team was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last save
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create an unsaved demo team.
    ///
    /// Demo teams start with the ingestion and onboarding flags already set,
    /// since the seeded dataset stands in for real ingestion.
    pub fn new_demo(organization_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            organization_id,
            name,
            api_token: format!("spt_{}", Uuid::new_v4().simple()),
            is_demo: true,
            ingested_event: true,
            completed_snippet_onboarding: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this team has been persisted yet
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
