//! Canonical fixture digests
//!
//! The digest identifies a dataset independent of file formatting: two
//! fixtures with the same content in a different order produce the same
//! digest. People sort by their distinct ID lists, groups by slot and key,
//! actions by name. Property maps already serialize with sorted keys, and
//! timestamps normalize to epoch milliseconds.

use crate::fixture::format::FixtureV0;
use serde::Serialize;
use sha2::{Digest, Sha256};
use synthpop_core::Properties;

#[derive(Serialize)]
struct CanonicalFixture {
    schema_version: u32,
    dataset_name: String,
    team_name: Option<String>,
    actions: Vec<CanonicalAction>,
    groups: Vec<CanonicalGroup>,
    people: Vec<CanonicalPerson>,
}

#[derive(Serialize)]
struct CanonicalAction {
    name: String,
    event_name: String,
}

#[derive(Serialize)]
struct CanonicalGroup {
    type_index: u8,
    key: String,
    properties: Properties,
}

#[derive(Serialize)]
struct CanonicalPerson {
    first_seen_at: Option<i64>,
    distinct_ids: Vec<String>,
    properties: Properties,
    events: Vec<CanonicalEvent>,
}

#[derive(Serialize)]
struct CanonicalEvent {
    event: String,
    timestamp: i64,
    properties: Properties,
}

/// Compute the canonical SHA-256 digest of a fixture, hex-encoded
pub fn compute_fixture_digest(fixture: &FixtureV0) -> String {
    let canonical = canonicalize(fixture);
    let json = serde_json::to_string(&canonical).expect("canonical fixture serializes");
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonicalize(fixture: &FixtureV0) -> CanonicalFixture {
    let mut actions: Vec<CanonicalAction> = fixture
        .actions
        .iter()
        .map(|a| CanonicalAction {
            name: a.name.clone(),
            event_name: a.event_name.clone(),
        })
        .collect();
    actions.sort_by(|a, b| a.name.cmp(&b.name));

    let mut groups: Vec<CanonicalGroup> = fixture
        .groups
        .iter()
        .map(|g| CanonicalGroup {
            type_index: g.type_index,
            key: g.key.clone(),
            properties: g.properties.clone(),
        })
        .collect();
    groups.sort_by(|a, b| (a.type_index, a.key.as_str()).cmp(&(b.type_index, b.key.as_str())));

    let mut people: Vec<CanonicalPerson> = fixture
        .people
        .iter()
        .map(|p| CanonicalPerson {
            first_seen_at: p.first_seen_at.map(|t| t.timestamp_millis()),
            distinct_ids: p.distinct_ids.clone(),
            properties: p.properties.clone(),
            events: p
                .events
                .iter()
                .map(|e| CanonicalEvent {
                    event: e.event.clone(),
                    timestamp: e.timestamp.timestamp_millis(),
                    properties: e.properties.clone(),
                })
                .collect(),
        })
        .collect();
    // Distinct IDs are unique across a fixture, so the ID list is a stable
    // sort key; first_seen_at breaks ties for people without IDs
    people.sort_by(|a, b| {
        a.distinct_ids
            .cmp(&b.distinct_ids)
            .then(a.first_seen_at.cmp(&b.first_seen_at))
    });

    CanonicalFixture {
        schema_version: fixture.schema_version,
        dataset_name: fixture.dataset.name.clone(),
        team_name: fixture.team.as_ref().map(|t| t.name.clone()),
        actions,
        groups,
        people,
    }
}
