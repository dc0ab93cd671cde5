//! Error handling for synthpop-store
//!
//! Store operations return the structured `SynthError` from synthpop-core.
//! The helpers here build consistently-shaped errors at the SQLite, IO and
//! validation boundaries.

use synthpop_core::{SynthError, SynthErrorKind};

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Build an error from a rusqlite failure
pub fn from_rusqlite(err: rusqlite::Error) -> SynthError {
    SynthError::new(SynthErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Build a fixture validation error
pub fn fixture_validation(reason: impl Into<String>) -> SynthError {
    SynthError::new(SynthErrorKind::InvalidInput)
        .with_op("fixture_parse")
        .with_message(reason)
}

/// Build a migration failure error
pub fn migration_error(migration_id: &str, reason: &str) -> SynthError {
    SynthError::new(SynthErrorKind::Persistence)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(reason)
}

/// Build a checksum drift error for an already-applied migration
pub fn checksum_mismatch(migration_id: &str, recorded: &str, computed: &str) -> SynthError {
    SynthError::new(SynthErrorKind::ConstraintViolation)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!(
            "checksum mismatch: recorded {} but embedded SQL hashes to {}",
            recorded, computed
        ))
}

/// Build an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> SynthError {
    SynthError::new(SynthErrorKind::Io)
        .with_op(operation)
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rusqlite_failures_map_to_persistence() {
        let err = from_rusqlite(rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), SynthErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
    }

    #[test]
    fn fixture_validation_maps_to_invalid_input() {
        let err = fixture_validation("schema_version must be 0");
        assert_eq!(err.kind(), SynthErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("fixture_parse"));
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn checksum_mismatch_names_both_checksums() {
        let err = checksum_mismatch("001_app_schema", "aaa", "bbb");
        assert_eq!(err.kind(), SynthErrorKind::ConstraintViolation);
        assert_eq!(err.entity_id(), Some("001_app_schema"));
        assert!(err.message().contains("aaa"));
        assert!(err.message().contains("bbb"));
    }
}
