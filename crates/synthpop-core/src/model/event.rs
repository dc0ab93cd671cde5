//! Analytics events

use crate::model::properties::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event row in the analytics store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Time-ordered UUID derived from the event timestamp
    pub uuid: Uuid,
    /// Event name (e.g. "$pageview")
    pub event: String,
    /// Team the event belongs to
    pub team_id: i64,
    /// Distinct ID the event is attributed to
    pub distinct_id: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Event properties
    pub properties: Properties,
}

impl Event {
    /// Create a new event row
    pub fn new(
        uuid: Uuid,
        event: String,
        team_id: i64,
        distinct_id: String,
        timestamp: DateTime<Utc>,
        properties: Properties,
    ) -> Self {
        Self {
            uuid,
            event,
            team_id,
            distinct_id,
            timestamp,
            properties,
        }
    }
}
