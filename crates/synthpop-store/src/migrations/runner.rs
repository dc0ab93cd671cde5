//! Migration runner
//!
//! Applies embedded migrations in order, tracking each one in the store's
//! schema_version table. Re-running is a no-op as long as the embedded SQL
//! still matches the recorded checksum; drift is an error, not a silent
//! reapply.

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{analytics_migrations, app_migrations, Migration};
use rusqlite::{Connection, OptionalExtension};

/// Apply all pending app-store migrations
pub fn apply_app_migrations(conn: &mut Connection) -> Result<()> {
    apply_set(conn, &app_migrations())
}

/// Apply all pending analytics-store migrations
pub fn apply_analytics_migrations(conn: &mut Connection) -> Result<()> {
    apply_set(conn, &analytics_migrations())
}

fn apply_set(conn: &mut Connection, migrations: &[Migration]) -> Result<()> {
    create_schema_version_table(conn)?;
    for migration in migrations {
        apply_migration(conn, migration)?;
    }
    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT
        )",
        [],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

fn apply_migration(conn: &mut Connection, migration: &Migration) -> Result<()> {
    let checksum = compute_checksum(migration.sql);

    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded_checksum) = recorded {
        if let Some(recorded_checksum) = recorded_checksum {
            if recorded_checksum != checksum {
                return Err(checksum_mismatch(
                    migration.id,
                    &recorded_checksum,
                    &checksum,
                ));
            }
        }
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id = migration.id, "migration applied");
    Ok(())
}
