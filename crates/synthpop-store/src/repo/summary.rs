//! Cross-table row counts for status reporting

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Row counts for one team in the app store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    /// Team ID
    pub team_id: i64,
    /// Team display name
    pub team_name: String,
    /// Persons belonging to the team
    pub persons: i64,
    /// Distinct ID mappings belonging to the team
    pub distinct_ids: i64,
    /// Actions defined for the team
    pub actions: i64,
}

/// Count app-store rows per team, ordered by team ID
pub fn team_summaries(conn: &Connection) -> Result<Vec<TeamSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.id, t.name,
                    (SELECT COUNT(*) FROM persons p WHERE p.team_id = t.id),
                    (SELECT COUNT(*) FROM person_distinct_ids d WHERE d.team_id = t.id),
                    (SELECT COUNT(*) FROM actions a WHERE a.team_id = t.id)
             FROM teams t
             ORDER BY t.id",
        )
        .map_err(from_rusqlite)?;
    let summaries = stmt
        .query_map([], |row| {
            Ok(TeamSummary {
                team_id: row.get(0)?,
                team_name: row.get(1)?,
                persons: row.get(2)?,
                distinct_ids: row.get(3)?,
                actions: row.get(4)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(summaries)
}
