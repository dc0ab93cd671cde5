//! Fixture Format v0 parser
//!
//! Reads fixture YAML and validates the structural rules serde cannot
//! express, before anything touches a store.

use crate::errors::{fixture_validation, io_error, Result};
use crate::fixture::format::FixtureV0;
use std::collections::HashSet;
use std::path::Path;
use synthpop_core::GroupTypeIndex;

/// Schema version this parser understands
pub const SUPPORTED_SCHEMA_VERSION: u32 = 0;

/// Parse and validate a fixture file
pub fn parse_fixture_file<P: AsRef<Path>>(path: P) -> Result<FixtureV0> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error("read_fixture", e))?;
    parse_fixture_str(&content)
}

/// Parse and validate fixture YAML from a string
pub fn parse_fixture_str(content: &str) -> Result<FixtureV0> {
    let fixture: FixtureV0 = serde_yaml::from_str(content)
        .map_err(|e| fixture_validation(format!("invalid fixture YAML: {}", e)))?;
    validate_fixture(&fixture)?;
    Ok(fixture)
}

fn validate_fixture(fixture: &FixtureV0) -> Result<()> {
    if fixture.schema_version != SUPPORTED_SCHEMA_VERSION {
        return Err(fixture_validation(format!(
            "unsupported schema_version {} (expected {})",
            fixture.schema_version, SUPPORTED_SCHEMA_VERSION
        )));
    }

    if fixture.dataset.name.trim().is_empty() {
        return Err(fixture_validation("dataset.name must not be empty"));
    }

    let mut group_keys: HashSet<(u8, &str)> = HashSet::new();
    for group in &fixture.groups {
        if group.type_index >= GroupTypeIndex::SLOT_COUNT {
            return Err(fixture_validation(format!(
                "group '{}' uses type_index {} (slots are 0-4)",
                group.key, group.type_index
            )));
        }
        if !group_keys.insert((group.type_index, group.key.as_str())) {
            return Err(fixture_validation(format!(
                "duplicate group '{}' in slot {}",
                group.key, group.type_index
            )));
        }
    }

    // Actions upsert by (team, name), so duplicate names would silently
    // collapse; reject them instead
    let mut action_names: HashSet<&str> = HashSet::new();
    for action in &fixture.actions {
        if !action_names.insert(action.name.as_str()) {
            return Err(fixture_validation(format!(
                "duplicate action '{}'",
                action.name
            )));
        }
    }

    // Distinct IDs are unique per team; a collision would fail the bulk
    // insert halfway through a run
    let mut distinct_ids: HashSet<&str> = HashSet::new();
    for (position, person) in fixture.people.iter().enumerate() {
        for distinct_id in &person.distinct_ids {
            if !distinct_ids.insert(distinct_id.as_str()) {
                return Err(fixture_validation(format!(
                    "distinct_id '{}' appears more than once",
                    distinct_id
                )));
            }
        }
        if person.first_seen_at.is_none() && !person.events.is_empty() {
            return Err(fixture_validation(format!(
                "person at position {} has events but no first_seen_at",
                position
            )));
        }
        if person.first_seen_at.is_some() && person.distinct_ids.is_empty() {
            return Err(fixture_validation(format!(
                "person at position {} was seen but has no distinct_ids",
                position
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
schema_version: 0
dataset:
  name: minimal
people:
  - first_seen_at: "2024-08-01T10:00:00Z"
    distinct_ids: ["device-1"]
    events:
      - event: "$pageview"
        timestamp: "2024-08-01T10:00:00Z"
"#;

    #[test]
    fn minimal_fixture_parses() {
        let fixture = parse_fixture_str(MINIMAL).unwrap();
        assert_eq!(fixture.schema_version, 0);
        assert_eq!(fixture.dataset.name, "minimal");
        assert_eq!(fixture.people.len(), 1);
        assert!(fixture.team.is_none());
        assert!(fixture.actions.is_empty());
        assert!(fixture.groups.is_empty());
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let content = MINIMAL.replace("schema_version: 0", "schema_version: 3");
        let err = parse_fixture_str(&content).unwrap_err();
        assert!(err.message().contains("schema_version 3"));
    }

    #[test]
    fn group_slot_out_of_range_is_rejected() {
        let content = format!("{}\ngroups:\n  - type_index: 7\n    key: acme\n", MINIMAL);
        let err = parse_fixture_str(&content).unwrap_err();
        assert!(err.message().contains("slots are 0-4"));
    }

    #[test]
    fn duplicate_groups_in_one_slot_are_rejected() {
        let content = format!(
            "{}\ngroups:\n  - type_index: 1\n    key: acme\n  - type_index: 1\n    key: acme\n",
            MINIMAL
        );
        let err = parse_fixture_str(&content).unwrap_err();
        assert!(err.message().contains("duplicate group"));
    }

    #[test]
    fn same_key_in_two_slots_is_allowed() {
        let content = format!(
            "{}\ngroups:\n  - type_index: 0\n    key: acme\n  - type_index: 1\n    key: acme\n",
            MINIMAL
        );
        assert!(parse_fixture_str(&content).is_ok());
    }

    #[test]
    fn duplicate_distinct_ids_are_rejected() {
        let content = r#"
schema_version: 0
dataset:
  name: dupes
people:
  - first_seen_at: "2024-08-01T10:00:00Z"
    distinct_ids: ["shared"]
  - first_seen_at: "2024-08-02T10:00:00Z"
    distinct_ids: ["shared"]
"#;
        let err = parse_fixture_str(content).unwrap_err();
        assert!(err.message().contains("'shared'"));
    }

    #[test]
    fn events_without_first_seen_at_are_rejected() {
        let content = r#"
schema_version: 0
dataset:
  name: ghosts
people:
  - distinct_ids: ["device-1"]
    events:
      - event: "$pageview"
        timestamp: 0
"#;
        let err = parse_fixture_str(content).unwrap_err();
        assert!(err.message().contains("no first_seen_at"));
    }

    #[test]
    fn seen_people_need_a_distinct_id() {
        let content = r#"
schema_version: 0
dataset:
  name: anonymous
people:
  - first_seen_at: "2024-08-01T10:00:00Z"
"#;
        let err = parse_fixture_str(content).unwrap_err();
        assert!(err.message().contains("no distinct_ids"));
    }

    #[test]
    fn never_seen_people_without_events_are_fine() {
        let content = r#"
schema_version: 0
dataset:
  name: quiet
people:
  - distinct_ids: []
"#;
        let fixture = parse_fixture_str(content).unwrap();
        assert!(fixture.people[0].first_seen_at.is_none());
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let err = parse_fixture_file("/nonexistent/fixture.yaml").unwrap_err();
        assert_eq!(err.kind(), synthpop_core::SynthErrorKind::Io);
    }
}
