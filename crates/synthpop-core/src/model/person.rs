//! Persons and distinct ID mappings

use crate::model::properties::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Person derived from a simulated individual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Time-ordered UUID derived from the person's first_seen_at
    pub uuid: Uuid,
    /// Team this person belongs to
    pub team_id: i64,
    /// Person properties at the end of the simulation
    pub properties: Properties,
    /// Timestamp when this person row was created
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Create a new person row
    pub fn new(uuid: Uuid, team_id: i64, properties: Properties) -> Self {
        Self {
            uuid,
            team_id,
            properties,
            created_at: Utc::now(),
        }
    }
}

/// Mapping from a raw distinct ID to a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDistinctId {
    /// Team the distinct ID is scoped to
    pub team_id: i64,
    /// Raw identifier seen on events (device ID, login, ...)
    pub distinct_id: String,
    /// Person the identifier resolves to
    pub person_uuid: Uuid,
}

impl PersonDistinctId {
    /// Create a new distinct ID mapping
    pub fn new(team_id: i64, distinct_id: String, person_uuid: Uuid) -> Self {
        Self {
            team_id,
            distinct_id,
            person_uuid,
        }
    }
}
