//! Seed-run ledger
//!
//! Every seeding run leaves an audit trail in the app store's
//! seed_run_events table: one started row, one team_seeded row per bulk
//! insert, and one completed row carrying counts and timings. Rows
//! correlate through the run ID.

use crate::errors::{from_rusqlite, Result};
use rusqlite::{params, Connection, Transaction};

/// Kind of ledger event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    /// A seeding run started
    RunStarted,
    /// A team's bulk person insert committed
    TeamSeeded,
    /// A seeding run completed
    RunCompleted,
}

impl LedgerKind {
    /// Stable string stored in the kind column
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::RunStarted => "seed_run_started",
            LedgerKind::TeamSeeded => "seed_team_seeded",
            LedgerKind::RunCompleted => "seed_run_completed",
        }
    }
}

/// Ledger row read back for reporting and tests
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEvent {
    /// Kind string, one of the LedgerKind values
    pub kind: String,
    /// Run ID the row belongs to
    pub correlation_id: String,
    /// Epoch seconds when the row was written
    pub timestamp: i64,
    /// Free-form JSON payload
    pub metadata: serde_json::Value,
}

/// Record a ledger event
pub fn record_event(
    conn: &Connection,
    kind: LedgerKind,
    correlation_id: &str,
    metadata: Option<serde_json::Value>,
) -> Result<()> {
    let metadata_json = metadata
        .map(|m| serde_json::to_string(&m).unwrap_or_else(|_| "{}".to_string()))
        .unwrap_or_else(|| "{}".to_string());
    conn.execute(
        "INSERT INTO seed_run_events (kind, correlation_id, timestamp, metadata)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            kind.as_str(),
            correlation_id,
            chrono::Utc::now().timestamp(),
            metadata_json,
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Record a ledger event inside an open transaction
pub fn record_event_tx(
    tx: &Transaction,
    kind: LedgerKind,
    correlation_id: &str,
    metadata: Option<serde_json::Value>,
) -> Result<()> {
    record_event(tx, kind, correlation_id, metadata)
}

/// Record the start of a run
pub fn record_started(conn: &Connection, run_id: &str, dataset_digest: Option<&str>) -> Result<()> {
    let metadata = dataset_digest.map(|digest| serde_json::json!({ "dataset_digest": digest }));
    record_event(conn, LedgerKind::RunStarted, run_id, metadata)
}

/// Record a committed bulk insert for a team, inside the bulk transaction
pub fn record_team_seeded_tx(
    tx: &Transaction,
    run_id: &str,
    team_id: i64,
    people_saved: usize,
    distinct_ids_saved: usize,
) -> Result<()> {
    record_event_tx(
        tx,
        LedgerKind::TeamSeeded,
        run_id,
        Some(serde_json::json!({
            "team_id": team_id,
            "people_saved": people_saved,
            "distinct_ids_saved": distinct_ids_saved,
        })),
    )
}

/// Record the completion of a run with its report metadata
pub fn record_completed(
    conn: &Connection,
    run_id: &str,
    metadata: serde_json::Value,
) -> Result<()> {
    record_event(conn, LedgerKind::RunCompleted, run_id, Some(metadata))
}

/// List ledger events for one run, oldest first
pub fn list_run_events(conn: &Connection, run_id: &str) -> Result<Vec<LedgerEvent>> {
    let mut stmt = conn
        .prepare(
            "SELECT kind, correlation_id, timestamp, metadata
             FROM seed_run_events WHERE correlation_id = ?1 ORDER BY id",
        )
        .map_err(from_rusqlite)?;
    let events = stmt
        .query_map(params![run_id], |row| {
            let metadata_json: String = row.get(3)?;
            Ok(LedgerEvent {
                kind: row.get(0)?,
                correlation_id: row.get(1)?,
                timestamp: row.get(2)?,
                metadata: serde_json::from_str(&metadata_json).unwrap_or_default(),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(events)
}

/// List the most recent ledger events across all runs, newest first
pub fn list_recent_events(conn: &Connection, limit: usize) -> Result<Vec<LedgerEvent>> {
    let mut stmt = conn
        .prepare(
            "SELECT kind, correlation_id, timestamp, metadata
             FROM seed_run_events ORDER BY id DESC LIMIT ?1",
        )
        .map_err(from_rusqlite)?;
    let events = stmt
        .query_map(params![limit as i64], |row| {
            let metadata_json: String = row.get(3)?;
            Ok(LedgerEvent {
                kind: row.get(0)?,
                correlation_id: row.get(1)?,
                timestamp: row.get(2)?,
                metadata: serde_json::from_str(&metadata_json).unwrap_or_default(),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::migrations;
    use serde_json::json;

    fn setup_app_db() -> Connection {
        let mut conn = db::open_in_memory().unwrap();
        migrations::apply_app_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn kinds_have_distinct_stable_strings() {
        let kinds = [
            LedgerKind::RunStarted,
            LedgerKind::TeamSeeded,
            LedgerKind::RunCompleted,
        ];
        let strings: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
        assert_eq!(strings.len(), 3);
        assert!(strings.iter().all(|s| s.starts_with("seed_")));
        let mut deduped = strings.clone();
        deduped.dedup();
        assert_eq!(deduped, strings);
    }

    #[test]
    fn run_events_round_trip_in_order() {
        let conn = setup_app_db();
        record_started(&conn, "run-1", Some("digest-abc")).unwrap();
        record_completed(&conn, "run-1", json!({"people_saved": 3})).unwrap();
        record_started(&conn, "run-2", None).unwrap();

        let events = list_run_events(&conn, "run-1").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, "seed_run_started");
        assert_eq!(events[0].metadata["dataset_digest"], "digest-abc");
        assert_eq!(events[1].kind, "seed_run_completed");
        assert_eq!(events[1].metadata["people_saved"], 3);

        let other = list_run_events(&conn, "run-2").unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].metadata, serde_json::json!({}));
    }

    #[test]
    fn tx_rows_roll_back_with_their_transaction() {
        let mut conn = setup_app_db();
        let tx = conn.transaction().unwrap();
        record_team_seeded_tx(&tx, "run-3", 1, 10, 12).unwrap();
        drop(tx); // rollback

        assert!(list_run_events(&conn, "run-3").unwrap().is_empty());
    }

    #[test]
    fn committed_tx_rows_are_visible() {
        let mut conn = setup_app_db();
        let tx = conn.transaction().unwrap();
        record_team_seeded_tx(&tx, "run-4", 7, 2, 5).unwrap();
        tx.commit().unwrap();

        let events = list_run_events(&conn, "run-4").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "seed_team_seeded");
        assert_eq!(events[0].metadata["team_id"], 7);
        assert_eq!(events[0].metadata["distinct_ids_saved"], 5);
    }

    #[test]
    fn recent_events_come_newest_first_and_respect_the_limit() {
        let conn = setup_app_db();
        record_started(&conn, "run-a", None).unwrap();
        record_completed(&conn, "run-a", json!({})).unwrap();
        record_started(&conn, "run-b", None).unwrap();

        let recent = list_recent_events(&conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].correlation_id, "run-b");
        assert_eq!(recent[0].kind, "seed_run_started");
        assert_eq!(recent[1].correlation_id, "run-a");
        assert_eq!(recent[1].kind, "seed_run_completed");
    }
}
