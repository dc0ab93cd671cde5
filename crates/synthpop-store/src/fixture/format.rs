//! Fixture Format v0 schema
//!
//! A fixture file is a YAML document describing a complete canned dataset:
//! the team configuration, actions, groups, and every simulated person with
//! their event history. Timestamps accept either RFC 3339 strings or epoch
//! milliseconds.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use synthpop_core::Properties;

/// Top-level fixture file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureV0 {
    /// Schema version; this parser understands version 0
    pub schema_version: u32,
    /// Dataset metadata
    pub dataset: FixtureDataset,
    /// Team configuration applied during project setup
    #[serde(default)]
    pub team: Option<FixtureTeam>,
    /// Actions the project defines
    #[serde(default)]
    pub actions: Vec<FixtureAction>,
    /// Groups, each addressed to one of the five type slots
    #[serde(default)]
    pub groups: Vec<FixtureGroup>,
    /// Simulated people
    pub people: Vec<FixturePerson>,
}

/// Dataset metadata block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDataset {
    /// Dataset name; doubles as the default team name
    pub name: String,
}

/// Team configuration block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureTeam {
    /// Name the team takes during project setup
    pub name: String,
}

/// Action definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureAction {
    /// Action display name (unique per fixture)
    pub name: String,
    /// Event name the action matches
    pub event_name: String,
}

/// Group definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureGroup {
    /// Type slot, 0 through 4
    pub type_index: u8,
    /// Group key within the slot
    pub key: String,
    /// Group properties
    #[serde(default)]
    pub properties: Properties,
}

/// One simulated person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixturePerson {
    /// First time the person was observed; absent for never-active people
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub first_seen_at: Option<DateTime<Utc>>,
    /// Distinct IDs the person accumulated, in acquisition order
    #[serde(default)]
    pub distinct_ids: Vec<String>,
    /// Person properties at the end of the simulation
    #[serde(default)]
    pub properties: Properties,
    /// Observed events in simulation order
    #[serde(default)]
    pub events: Vec<FixtureEvent>,
}

/// One observed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureEvent {
    /// Event name
    pub event: String,
    /// When the event occurred
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Event properties; "$distinct_id" defaults to the person's first
    /// distinct ID when omitted
    #[serde(default)]
    pub properties: Properties,
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an RFC 3339 string or epoch milliseconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", value, e)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        DateTime::from_timestamp_millis(value)
            .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {}", value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value > i64::MAX as u64 {
            return Err(de::Error::custom(format!(
                "epoch millis out of range: {}",
                value
            )));
        }
        self.visit_i64(value as i64)
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TimestampVisitor)
}

struct OptTimestampVisitor;

impl<'de> Visitor<'de> for OptTimestampVisitor {
    type Value = Option<DateTime<Utc>>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an RFC 3339 string, epoch milliseconds, or null")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_timestamp(deserializer).map(Some)
    }
}

fn deserialize_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptTimestampVisitor)
}
