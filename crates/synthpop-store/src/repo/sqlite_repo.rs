//! SQLite repository for the app store
//!
//! Persistence follows creation order: organizations and users first, then
//! teams, then persons and distinct IDs (bulk, inside one transaction),
//! then action match sets. Person and distinct ID batches insert without
//! upsert on purpose: a collision means the dataset conflicts with what is
//! already stored, and the whole batch must roll back.

use crate::errors::{from_rusqlite, Result};
use crate::repo::hydration;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use synthpop_core::model::{
    Action, Organization, Person, PersonDistinctId, Team, User,
};
use synthpop_core::SimDataError;
use uuid::Uuid;

/// Repository for app-store tables
pub struct AppRepo;

impl AppRepo {
    /// Insert or update an organization by ID
    pub fn persist_organization(conn: &Connection, organization: &Organization) -> Result<()> {
        conn.execute(
            "INSERT INTO organizations (id, name, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![
                organization.id,
                organization.name,
                organization.created_at.timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Get an organization by ID
    pub fn get_organization(conn: &Connection, id: &str) -> Result<Option<Organization>> {
        conn.query_row(
            "SELECT id, name, created_at FROM organizations WHERE id = ?1",
            params![id],
            hydration::organization_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Find an organization by display name (oldest wins on duplicates)
    pub fn find_organization_by_name(conn: &Connection, name: &str) -> Result<Option<Organization>> {
        conn.query_row(
            "SELECT id, name, created_at FROM organizations WHERE name = ?1 ORDER BY created_at, id LIMIT 1",
            params![name],
            hydration::organization_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Insert or update a user by ID
    pub fn persist_user(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "INSERT INTO users (id, email, first_name, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                first_name = excluded.first_name",
            params![
                user.id,
                user.email,
                user.first_name,
                user.created_at.timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Find a user by email
    pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        conn.query_row(
            "SELECT id, email, first_name, created_at FROM users WHERE email = ?1",
            params![email],
            hydration::user_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Insert a new team and assign its numeric ID
    pub fn create_team(conn: &Connection, team: &mut Team) -> Result<()> {
        conn.execute(
            "INSERT INTO teams (organization_id, name, api_token, is_demo, ingested_event,
                                completed_snippet_onboarding, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                team.organization_id,
                team.name,
                team.api_token,
                if team.is_demo { 1 } else { 0 },
                if team.ingested_event { 1 } else { 0 },
                if team.completed_snippet_onboarding { 1 } else { 0 },
                team.created_at.timestamp(),
                team.updated_at.timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;
        team.id = conn.last_insert_rowid();
        Ok(())
    }

    /// Save changes to an existing team
    pub fn update_team(conn: &Connection, team: &Team) -> Result<()> {
        let rows = conn
            .execute(
                "UPDATE teams SET
                    name = ?1,
                    api_token = ?2,
                    is_demo = ?3,
                    ingested_event = ?4,
                    completed_snippet_onboarding = ?5,
                    updated_at = ?6
                 WHERE id = ?7",
                params![
                    team.name,
                    team.api_token,
                    if team.is_demo { 1 } else { 0 },
                    if team.ingested_event { 1 } else { 0 },
                    if team.completed_snippet_onboarding { 1 } else { 0 },
                    team.updated_at.timestamp(),
                    team.id,
                ],
            )
            .map_err(from_rusqlite)?;
        if rows == 0 {
            return Err(SimDataError::TeamNotFound { team_id: team.id }.into());
        }
        Ok(())
    }

    /// Get a team by ID
    pub fn get_team(conn: &Connection, team_id: i64) -> Result<Option<Team>> {
        conn.query_row(
            "SELECT id, organization_id, name, api_token, is_demo, ingested_event,
                    completed_snippet_onboarding, created_at, updated_at
             FROM teams WHERE id = ?1",
            params![team_id],
            hydration::team_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Insert or update an action by (team, name), assigning its numeric ID
    pub fn persist_action(conn: &Connection, action: &mut Action) -> Result<()> {
        conn.execute(
            "INSERT INTO actions (team_id, name, event_name, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(team_id, name) DO UPDATE SET
                event_name = excluded.event_name,
                created_by = excluded.created_by",
            params![
                action.team_id,
                action.name,
                action.event_name,
                action.created_by,
                action.created_at.timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;
        let id: i64 = conn
            .query_row(
                "SELECT id FROM actions WHERE team_id = ?1 AND name = ?2",
                params![action.team_id, action.name],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        action.id = id;
        Ok(())
    }

    /// List a team's actions, oldest first
    pub fn list_actions(conn: &Connection, team_id: i64) -> Result<Vec<Action>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, team_id, name, event_name, created_by, created_at
                 FROM actions WHERE team_id = ?1 ORDER BY id",
            )
            .map_err(from_rusqlite)?;
        let actions = stmt
            .query_map(params![team_id], hydration::action_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(actions)
    }

    /// Insert a batch of persons inside an open transaction.
    ///
    /// A duplicate UUID fails the batch; the caller's transaction rolls
    /// back and nothing from it is kept.
    pub fn bulk_insert_persons(tx: &Transaction, persons: &[Person]) -> Result<()> {
        let mut stmt = tx
            .prepare(
                "INSERT INTO persons (uuid, team_id, properties, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(from_rusqlite)?;
        for person in persons {
            stmt.execute(params![
                person.uuid.to_string(),
                person.team_id,
                serde_json::to_string(&person.properties).unwrap_or_else(|_| "{}".to_string()),
                person.created_at.timestamp(),
            ])
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    /// Insert a batch of distinct ID mappings inside an open transaction.
    ///
    /// A duplicate (team, distinct_id) pair fails the batch.
    pub fn bulk_insert_distinct_ids(tx: &Transaction, mappings: &[PersonDistinctId]) -> Result<()> {
        let mut stmt = tx
            .prepare(
                "INSERT INTO person_distinct_ids (team_id, distinct_id, person_uuid)
                 VALUES (?1, ?2, ?3)",
            )
            .map_err(from_rusqlite)?;
        for mapping in mappings {
            stmt.execute(params![
                mapping.team_id,
                mapping.distinct_id,
                mapping.person_uuid.to_string(),
            ])
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    /// Get a person by UUID
    pub fn get_person(conn: &Connection, uuid: &Uuid) -> Result<Option<Person>> {
        conn.query_row(
            "SELECT uuid, team_id, properties, created_at FROM persons WHERE uuid = ?1",
            params![uuid.to_string()],
            |row| hydration::person_from_row(row, hydration::seconds_to_datetime),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List a team's persons ordered by UUID (which is creation-time order)
    pub fn list_persons(conn: &Connection, team_id: i64) -> Result<Vec<Person>> {
        let mut stmt = conn
            .prepare(
                "SELECT uuid, team_id, properties, created_at
                 FROM persons WHERE team_id = ?1 ORDER BY uuid",
            )
            .map_err(from_rusqlite)?;
        let persons = stmt
            .query_map(params![team_id], |row| {
                hydration::person_from_row(row, hydration::seconds_to_datetime)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(persons)
    }

    /// List a team's distinct ID mappings ordered by distinct_id
    pub fn list_distinct_ids(conn: &Connection, team_id: i64) -> Result<Vec<PersonDistinctId>> {
        let mut stmt = conn
            .prepare(
                "SELECT team_id, distinct_id, person_uuid
                 FROM person_distinct_ids WHERE team_id = ?1 ORDER BY distinct_id",
            )
            .map_err(from_rusqlite)?;
        let mappings = stmt
            .query_map(params![team_id], hydration::distinct_id_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(mappings)
    }

    /// Replace an action's stored match set in one transaction
    pub fn replace_action_events(
        conn: &mut Connection,
        action_id: i64,
        event_uuids: &[Uuid],
    ) -> Result<usize> {
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tx.execute(
            "DELETE FROM action_events WHERE action_id = ?1",
            params![action_id],
        )
        .map_err(from_rusqlite)?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO action_events (action_id, event_uuid) VALUES (?1, ?2)")
                .map_err(from_rusqlite)?;
            for event_uuid in event_uuids {
                stmt.execute(params![action_id, event_uuid.to_string()])
                    .map_err(from_rusqlite)?;
            }
        }
        tx.commit().map_err(from_rusqlite)?;
        Ok(event_uuids.len())
    }

    /// Count the stored match set for an action
    pub fn count_action_events(conn: &Connection, action_id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM action_events WHERE action_id = ?1",
            params![action_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }
}
