//! Simulated people and their event histories

use crate::model::properties::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved property carrying the distinct ID an event is attributed to
pub const DISTINCT_ID_PROPERTY: &str = "$distinct_id";

/// Single event observed for a simulated person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    /// Event name (e.g. "$pageview")
    pub event: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Event properties; must include "$distinct_id" for attribution
    pub properties: Properties,
}

impl SimEvent {
    /// Get the distinct ID this event is attributed to, if present
    pub fn distinct_id(&self) -> Option<&str> {
        self.properties.get_str(DISTINCT_ID_PROPERTY)
    }
}

/// Simulated individual with identity and event history
///
/// A person who never became active has no `first_seen_at`; such people are
/// part of the simulated population but are skipped at persistence time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimPerson {
    /// When this person was first observed (None if never active)
    pub first_seen_at: Option<DateTime<Utc>>,
    /// Raw distinct IDs accumulated across devices and sessions
    pub distinct_ids: Vec<String>,
    /// Person properties at the end of the simulation
    pub properties: Properties,
    /// Events observed for this person, in simulation order
    pub events: Vec<SimEvent>,
}

impl SimPerson {
    /// Create a person that has not been observed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether this person was ever observed
    pub fn was_seen(&self) -> bool {
        self.first_seen_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_person_was_never_seen() {
        let person = SimPerson::new();
        assert!(!person.was_seen());
        assert!(person.distinct_ids.is_empty());
        assert!(person.events.is_empty());
    }

    #[test]
    fn person_with_first_seen_at_was_seen() {
        let person = SimPerson {
            first_seen_at: Some(Utc::now()),
            ..SimPerson::new()
        };
        assert!(person.was_seen());
    }

    #[test]
    fn event_distinct_id_reads_the_reserved_property() {
        let event = SimEvent {
            event: "$pageview".to_string(),
            timestamp: Utc::now(),
            properties: Properties::from_json(json!({
                "$distinct_id": "device-1",
                "$current_url": "/",
            })),
        };
        assert_eq!(event.distinct_id(), Some("device-1"));
    }

    #[test]
    fn event_without_the_property_has_no_distinct_id() {
        let event = SimEvent {
            event: "$pageview".to_string(),
            timestamp: Utc::now(),
            properties: Properties::new(),
        };
        assert_eq!(event.distinct_id(), None);
    }

    #[test]
    fn non_string_distinct_id_is_ignored() {
        let event = SimEvent {
            event: "$pageview".to_string(),
            timestamp: Utc::now(),
            properties: Properties::from_json(json!({"$distinct_id": 42})),
        };
        assert_eq!(event.distinct_id(), None);
    }
}
