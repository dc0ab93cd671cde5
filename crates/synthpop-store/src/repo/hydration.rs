//! Hydration layer - converts database rows back into domain models
//!
//! Row mappers are shared by the app and analytics repositories. They run
//! inside rusqlite query closures, so failures surface as rusqlite errors
//! and get wrapped once at the repository boundary.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use synthpop_core::model::{
    Action, Event, Group, GroupTypeIndex, Organization, Person, PersonDistinctId, Team, User,
};
use uuid::Uuid;

/// Interpret an epoch-seconds column
pub(crate) fn seconds_to_datetime(seconds: i64) -> DateTime<Utc> {
    chrono::DateTime::from_timestamp(seconds, 0).unwrap_or_else(chrono::Utc::now)
}

/// Interpret an epoch-milliseconds column
pub(crate) fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    chrono::DateTime::from_timestamp_millis(millis).unwrap_or_else(chrono::Utc::now)
}

/// Parse a UUID column, reporting the column index on failure
pub(crate) fn parse_uuid(column: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Columns: id, name, created_at
pub(crate) fn organization_from_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let created_at: i64 = row.get(2)?;

    let mut organization = Organization::new(id, name);
    organization.created_at = seconds_to_datetime(created_at);
    Ok(organization)
}

/// Columns: id, email, first_name, created_at
pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let email: String = row.get(1)?;
    let first_name: String = row.get(2)?;
    let created_at: i64 = row.get(3)?;

    let mut user = User::new(id, email, first_name);
    user.created_at = seconds_to_datetime(created_at);
    Ok(user)
}

/// Columns: id, organization_id, name, api_token, is_demo, ingested_event,
/// completed_snippet_onboarding, created_at, updated_at
pub(crate) fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    let id: i64 = row.get(0)?;
    let organization_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let api_token: String = row.get(3)?;
    let is_demo: i32 = row.get(4)?;
    let ingested_event: i32 = row.get(5)?;
    let completed_snippet_onboarding: i32 = row.get(6)?;
    let created_at: i64 = row.get(7)?;
    let updated_at: i64 = row.get(8)?;

    let mut team = Team::new_demo(organization_id, name);
    team.id = id;
    team.api_token = api_token;
    team.is_demo = is_demo != 0;
    team.ingested_event = ingested_event != 0;
    team.completed_snippet_onboarding = completed_snippet_onboarding != 0;
    team.created_at = seconds_to_datetime(created_at);
    team.updated_at = seconds_to_datetime(updated_at);
    Ok(team)
}

/// Columns: uuid, team_id, properties, created_at (epoch seconds in the app
/// store, epoch millis in the analytics store; pass the right interpreter)
pub(crate) fn person_from_row(
    row: &Row<'_>,
    timestamps: fn(i64) -> DateTime<Utc>,
) -> rusqlite::Result<Person> {
    let uuid_raw: String = row.get(0)?;
    let team_id: i64 = row.get(1)?;
    let properties_json: String = row.get(2)?;
    let created_at: i64 = row.get(3)?;

    let uuid = parse_uuid(0, &uuid_raw)?;
    let mut person = Person::new(
        uuid,
        team_id,
        serde_json::from_str(&properties_json).unwrap_or_default(),
    );
    person.created_at = timestamps(created_at);
    Ok(person)
}

/// Columns: team_id, distinct_id, person_uuid
pub(crate) fn distinct_id_from_row(row: &Row<'_>) -> rusqlite::Result<PersonDistinctId> {
    let team_id: i64 = row.get(0)?;
    let distinct_id: String = row.get(1)?;
    let person_uuid_raw: String = row.get(2)?;

    let person_uuid = parse_uuid(2, &person_uuid_raw)?;
    Ok(PersonDistinctId::new(team_id, distinct_id, person_uuid))
}

/// Columns: id, team_id, name, event_name, created_by, created_at
pub(crate) fn action_from_row(row: &Row<'_>) -> rusqlite::Result<Action> {
    let id: i64 = row.get(0)?;
    let team_id: i64 = row.get(1)?;
    let name: String = row.get(2)?;
    let event_name: String = row.get(3)?;
    let created_by: Option<String> = row.get(4)?;
    let created_at: i64 = row.get(5)?;

    let mut action = Action::new(team_id, name, event_name);
    action.id = id;
    action.created_by = created_by;
    action.created_at = seconds_to_datetime(created_at);
    Ok(action)
}

/// Columns: uuid, event, team_id, distinct_id, timestamp, properties
pub(crate) fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    let uuid_raw: String = row.get(0)?;
    let event_name: String = row.get(1)?;
    let team_id: i64 = row.get(2)?;
    let distinct_id: String = row.get(3)?;
    let timestamp: i64 = row.get(4)?;
    let properties_json: String = row.get(5)?;

    let uuid = parse_uuid(0, &uuid_raw)?;
    Ok(Event::new(
        uuid,
        event_name,
        team_id,
        distinct_id,
        millis_to_datetime(timestamp),
        serde_json::from_str(&properties_json).unwrap_or_default(),
    ))
}

/// Columns: team_id, group_type_index, group_key, group_properties,
/// created_at
pub(crate) fn group_from_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    let team_id: i64 = row.get(0)?;
    let raw_index: u8 = row.get(1)?;
    let group_key: String = row.get(2)?;
    let properties_json: String = row.get(3)?;
    let created_at: i64 = row.get(4)?;

    let group_type_index = GroupTypeIndex::new(raw_index).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Integer, Box::new(e))
    })?;
    let mut group = Group::new(
        team_id,
        group_type_index,
        group_key,
        serde_json::from_str(&properties_json).unwrap_or_default(),
    );
    group.created_at = millis_to_datetime(created_at);
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_interpreters_agree_on_the_epoch() {
        assert_eq!(
            seconds_to_datetime(0).timestamp_millis(),
            millis_to_datetime(0).timestamp_millis()
        );
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        assert!(parse_uuid(0, "not-a-uuid").is_err());
        let id = Uuid::now_v7();
        assert_eq!(parse_uuid(0, &id.to_string()).unwrap(), id);
    }
}
