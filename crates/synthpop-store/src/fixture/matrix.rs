//! Fixture-backed dataset producer
//!
//! Adapts a parsed fixture file to the Matrix contract, so seeding runs can
//! use canned datasets in place of a live simulation. "Simulation" here is
//! materialization: people and groups come straight from the fixture, with
//! one convenience applied - events that omit "$distinct_id" get the
//! person's first distinct ID stamped in.

use crate::errors::Result;
use crate::fixture::digest::compute_fixture_digest;
use crate::fixture::format::FixtureV0;
use crate::fixture::parser::parse_fixture_file;
use serde_json::Value;
use std::path::Path;
use synthpop_core::sim::{Matrix, ProjectSetup, SimGroups, DISTINCT_ID_PROPERTY};
use synthpop_core::{ActionSpec, GroupTypeIndex, SimEvent, SimPerson, Team, User};

/// Dataset producer backed by a Fixture Format v0 file
pub struct FixtureMatrix {
    fixture: FixtureV0,
    digest: String,
    people: Vec<SimPerson>,
    groups: SimGroups,
    simulated: bool,
}

impl FixtureMatrix {
    /// Load a fixture file and wrap it as a Matrix
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let fixture = parse_fixture_file(path)?;
        Ok(Self::new(fixture))
    }

    /// Wrap an already-parsed fixture
    pub fn new(fixture: FixtureV0) -> Self {
        let digest = compute_fixture_digest(&fixture);
        Self {
            fixture,
            digest,
            people: Vec::new(),
            groups: SimGroups::new(),
            simulated: false,
        }
    }

    /// Dataset name from the fixture header
    pub fn dataset_name(&self) -> &str {
        &self.fixture.dataset.name
    }
}

impl Matrix for FixtureMatrix {
    fn set_project_up(&mut self, team: &mut Team, _user: &User) -> Result<ProjectSetup> {
        if let Some(fixture_team) = &self.fixture.team {
            team.name = fixture_team.name.clone();
        }
        Ok(ProjectSetup {
            actions: self
                .fixture
                .actions
                .iter()
                .map(|a| ActionSpec {
                    name: a.name.clone(),
                    event_name: a.event_name.clone(),
                })
                .collect(),
        })
    }

    fn simulate(&mut self) -> Result<()> {
        if self.simulated {
            return Ok(());
        }

        let mut people = Vec::with_capacity(self.fixture.people.len());
        for fixture_person in &self.fixture.people {
            let default_distinct_id = fixture_person.distinct_ids.first();
            let mut events = Vec::with_capacity(fixture_person.events.len());
            for fixture_event in &fixture_person.events {
                let mut properties = fixture_event.properties.clone();
                if !properties.contains_key(DISTINCT_ID_PROPERTY) {
                    if let Some(distinct_id) = default_distinct_id {
                        properties
                            .set(DISTINCT_ID_PROPERTY, Value::String(distinct_id.clone()));
                    }
                }
                events.push(SimEvent {
                    event: fixture_event.event.clone(),
                    timestamp: fixture_event.timestamp,
                    properties,
                });
            }
            people.push(SimPerson {
                first_seen_at: fixture_person.first_seen_at,
                distinct_ids: fixture_person.distinct_ids.clone(),
                properties: fixture_person.properties.clone(),
                events,
            });
        }

        let mut groups = SimGroups::new();
        for fixture_group in &self.fixture.groups {
            let slot = GroupTypeIndex::new(fixture_group.type_index)?;
            groups
                .entry(slot)
                .or_default()
                .insert(fixture_group.key.clone(), fixture_group.properties.clone());
        }

        self.people = people;
        self.groups = groups;
        self.simulated = true;
        Ok(())
    }

    fn people(&self) -> &[SimPerson] {
        &self.people
    }

    fn groups(&self) -> &SimGroups {
        &self.groups
    }

    fn dataset_digest(&self) -> Option<String> {
        Some(self.digest.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::parser::parse_fixture_str;

    const FULL: &str = r#"
schema_version: 0
dataset:
  name: office-sim
team:
  name: "Office Demo"
actions:
  - name: "Signed up"
    event_name: "user signed up"
groups:
  - type_index: 0
    key: acme
    properties:
      industry: saas
  - type_index: 2
    key: emea
people:
  - first_seen_at: "2024-08-01T10:00:00Z"
    distinct_ids: ["device-1", "user-1"]
    properties:
      email: "one@example.com"
    events:
      - event: "$pageview"
        timestamp: "2024-08-01T10:00:00Z"
      - event: "user signed up"
        timestamp: "2024-08-01T10:05:00Z"
        properties:
          "$distinct_id": "user-1"
  - distinct_ids: []
"#;

    fn full_matrix() -> FixtureMatrix {
        FixtureMatrix::new(parse_fixture_str(FULL).unwrap())
    }

    #[test]
    fn set_project_up_applies_team_name_and_actions() {
        let mut matrix = full_matrix();
        let mut team = Team::new_demo("org-1".to_string(), "placeholder".to_string());
        let user = User::new(
            "user-1".to_string(),
            "demo@example.com".to_string(),
            "Demo".to_string(),
        );

        let setup = matrix.set_project_up(&mut team, &user).unwrap();
        assert_eq!(team.name, "Office Demo");
        assert_eq!(setup.actions.len(), 1);
        assert_eq!(setup.actions[0].event_name, "user signed up");
    }

    #[test]
    fn simulate_materializes_people_and_groups() {
        let mut matrix = full_matrix();
        matrix.simulate().unwrap();

        assert_eq!(matrix.people().len(), 2);
        assert!(matrix.people()[0].was_seen());
        assert!(!matrix.people()[1].was_seen());

        let slots: Vec<u8> = matrix.groups().keys().map(|s| s.as_u8()).collect();
        assert_eq!(slots, vec![0, 2]);
        let companies = &matrix.groups()[&GroupTypeIndex::new(0).unwrap()];
        assert!(companies.contains_key("acme"));
    }

    #[test]
    fn simulate_stamps_the_default_distinct_id() {
        let mut matrix = full_matrix();
        matrix.simulate().unwrap();

        let events = &matrix.people()[0].events;
        // First event omitted the property; the person's first ID fills in
        assert_eq!(events[0].distinct_id(), Some("device-1"));
        // Explicit properties are left alone
        assert_eq!(events[1].distinct_id(), Some("user-1"));
    }

    #[test]
    fn simulate_is_idempotent() {
        let mut matrix = full_matrix();
        matrix.simulate().unwrap();
        let people_before = matrix.people().len();
        matrix.simulate().unwrap();
        assert_eq!(matrix.people().len(), people_before);
    }

    #[test]
    fn dataset_digest_is_exposed_through_the_trait() {
        let matrix = full_matrix();
        let digest = matrix.dataset_digest().unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(matrix.dataset_name(), "office-sim");
    }
}
