//! SQLite repository for the analytics store
//!
//! Writes go in one row at a time, the way an ingestion pipeline would
//! deliver them. Events append without upsert; person and group replicas
//! upsert, since re-ingesting a dataset should converge instead of erroring.
//! Analytics writes are not transactional with the app store.

use crate::errors::{from_rusqlite, Result};
use crate::repo::hydration;
use rusqlite::{params, Connection, OptionalExtension};
use synthpop_core::model::{Event, Group, GroupTypeIndex, Person, PersonDistinctId};
use uuid::Uuid;

/// Repository for analytics-store tables
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Append one event
    pub fn create_event(conn: &Connection, event: &Event) -> Result<()> {
        conn.execute(
            "INSERT INTO events (uuid, event, team_id, distinct_id, timestamp, properties)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.uuid.to_string(),
                event.event,
                event.team_id,
                event.distinct_id,
                event.timestamp.timestamp_millis(),
                serde_json::to_string(&event.properties).unwrap_or_else(|_| "{}".to_string()),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert or update a person replica by UUID
    pub fn create_person(conn: &Connection, person: &Person) -> Result<()> {
        conn.execute(
            "INSERT INTO persons (uuid, team_id, properties, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(uuid) DO UPDATE SET properties = excluded.properties",
            params![
                person.uuid.to_string(),
                person.team_id,
                serde_json::to_string(&person.properties).unwrap_or_else(|_| "{}".to_string()),
                person.created_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert or update a distinct ID replica by (team, distinct_id)
    pub fn create_person_distinct_id(
        conn: &Connection,
        mapping: &PersonDistinctId,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO person_distinct_ids (team_id, distinct_id, person_uuid)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(team_id, distinct_id) DO UPDATE SET
                person_uuid = excluded.person_uuid",
            params![
                mapping.team_id,
                mapping.distinct_id,
                mapping.person_uuid.to_string(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert or update a group by (team, slot, key)
    pub fn create_group(conn: &Connection, group: &Group) -> Result<()> {
        conn.execute(
            "INSERT INTO groups (team_id, group_type_index, group_key, group_properties, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(team_id, group_type_index, group_key) DO UPDATE SET
                group_properties = excluded.group_properties",
            params![
                group.team_id,
                group.group_type_index.as_u8(),
                group.group_key,
                serde_json::to_string(&group.group_properties)
                    .unwrap_or_else(|_| "{}".to_string()),
                group.created_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// List a team's events in time order
    pub fn list_events(conn: &Connection, team_id: i64) -> Result<Vec<Event>> {
        let mut stmt = conn
            .prepare(
                "SELECT uuid, event, team_id, distinct_id, timestamp, properties
                 FROM events WHERE team_id = ?1 ORDER BY timestamp, uuid",
            )
            .map_err(from_rusqlite)?;
        let events = stmt
            .query_map(params![team_id], hydration::event_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(events)
    }

    /// List UUIDs of a team's events matching a name, in time order
    pub fn list_event_uuids_by_name(
        conn: &Connection,
        team_id: i64,
        event_name: &str,
    ) -> Result<Vec<Uuid>> {
        let mut stmt = conn
            .prepare(
                "SELECT uuid FROM events
                 WHERE team_id = ?1 AND event = ?2 ORDER BY timestamp, uuid",
            )
            .map_err(from_rusqlite)?;
        let uuids = stmt
            .query_map(params![team_id, event_name], |row| {
                let raw: String = row.get(0)?;
                hydration::parse_uuid(0, &raw)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(uuids)
    }

    /// Count a team's events
    pub fn count_events(conn: &Connection, team_id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM events WHERE team_id = ?1",
            params![team_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Count events per team across the whole store
    pub fn event_counts_by_team(conn: &Connection) -> Result<Vec<(i64, i64)>> {
        let mut stmt = conn
            .prepare("SELECT team_id, COUNT(*) FROM events GROUP BY team_id ORDER BY team_id")
            .map_err(from_rusqlite)?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(counts)
    }

    /// Count a team's person replicas
    pub fn count_persons(conn: &Connection, team_id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM persons WHERE team_id = ?1",
            params![team_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    /// Get one group by its full key
    pub fn get_group(
        conn: &Connection,
        team_id: i64,
        group_type_index: GroupTypeIndex,
        group_key: &str,
    ) -> Result<Option<Group>> {
        conn.query_row(
            "SELECT team_id, group_type_index, group_key, group_properties, created_at
             FROM groups
             WHERE team_id = ?1 AND group_type_index = ?2 AND group_key = ?3",
            params![team_id, group_type_index.as_u8(), group_key],
            hydration::group_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List a team's groups ordered by slot, then key
    pub fn list_groups(conn: &Connection, team_id: i64) -> Result<Vec<Group>> {
        let mut stmt = conn
            .prepare(
                "SELECT team_id, group_type_index, group_key, group_properties, created_at
                 FROM groups WHERE team_id = ?1 ORDER BY group_type_index, group_key",
            )
            .map_err(from_rusqlite)?;
        let groups = stmt
            .query_map(params![team_id], hydration::group_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(groups)
    }
}
