//! Error facility for synthpop
//!
//! Two layers work together here:
//! - `SimDataError` is the domain-level enum raised where simulation data
//!   turns out to be unusable (missing attribution, bad group slots).
//! - `SynthError` is the structured error every fallible operation in the
//!   store and engine crates returns. It carries a stable error code plus
//!   optional operation and entity context for logs and ledger rows.

use crate::correlation::RunId;
use thiserror::Error;

/// Result type alias used across the synthpop crates
pub type Result<T> = std::result::Result<T, SynthError>;

/// Classification of a structured error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthErrorKind {
    /// Input failed validation (fixture files, arguments)
    InvalidInput,
    /// A referenced entity does not exist
    NotFound,
    /// A stored invariant was violated (e.g. migration checksum drift)
    ConstraintViolation,
    /// An event lacks the $distinct_id property used for attribution
    MissingDistinctId,
    /// A group type index falls outside the five supported slots
    UnknownGroupType,
    /// Filesystem trouble
    Io,
    /// JSON or YAML encoding/decoding failed
    Serialization,
    /// The underlying database rejected an operation
    Persistence,
    /// Unexpected internal failure
    Internal,
}

impl SynthErrorKind {
    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            SynthErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            SynthErrorKind::NotFound => "ERR_NOT_FOUND",
            SynthErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            SynthErrorKind::MissingDistinctId => "ERR_MISSING_DISTINCT_ID",
            SynthErrorKind::UnknownGroupType => "ERR_UNKNOWN_GROUP_TYPE",
            SynthErrorKind::Io => "ERR_IO",
            SynthErrorKind::Serialization => "ERR_SERIALIZATION",
            SynthErrorKind::Persistence => "ERR_PERSISTENCE",
            SynthErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Structured error carrying context for logs and reports
#[derive(Debug, Clone, PartialEq)]
pub struct SynthError {
    kind: SynthErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    team_id: Option<i64>,
    run_id: Option<RunId>,
    message: String,
}

impl SynthError {
    /// Create a new error of the given kind
    pub fn new(kind: SynthErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            team_id: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Attach the operation name that failed
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Attach the entity the failure concerns (person uuid, group key, ...)
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Attach the team the failure concerns
    pub fn with_team_id(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Attach the seeding run the failure happened in
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> SynthErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if attached
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID, if attached
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the team ID, if attached
    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Get the run ID, if attached
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(team_id) = self.team_id {
            write!(f, " (team_id: {})", team_id)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for SynthError {}

/// Domain errors raised when simulation data cannot be persisted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimDataError {
    /// Event carries no $distinct_id property, so it cannot be attributed
    #[error("event '{event_name}' at {timestamp} has no $distinct_id property")]
    MissingDistinctId {
        event_name: String,
        timestamp: String,
    },

    /// Group type index outside the five supported slots
    #[error("group type index {index} is out of range (0-4)")]
    GroupTypeIndexOutOfRange { index: u8 },

    /// Team does not exist in the app store
    #[error("team not found: {team_id}")]
    TeamNotFound { team_id: i64 },

    /// JSON encoding or decoding failed
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Unexpected internal failure
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl From<SimDataError> for SynthError {
    fn from(err: SimDataError) -> Self {
        match &err {
            SimDataError::MissingDistinctId { event_name, .. } => {
                SynthError::new(SynthErrorKind::MissingDistinctId)
                    .with_entity_id(event_name.clone())
                    .with_message(err.to_string())
            }
            SimDataError::GroupTypeIndexOutOfRange { .. } => {
                SynthError::new(SynthErrorKind::UnknownGroupType).with_message(err.to_string())
            }
            SimDataError::TeamNotFound { team_id } => SynthError::new(SynthErrorKind::NotFound)
                .with_team_id(*team_id)
                .with_message(err.to_string()),
            SimDataError::Serialization { .. } => {
                SynthError::new(SynthErrorKind::Serialization).with_message(err.to_string())
            }
            SimDataError::Internal { .. } => {
                SynthError::new(SynthErrorKind::Internal).with_message(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for SimDataError {
    fn from(err: serde_json::Error) -> Self {
        SimDataError::Serialization {
            message: err.to_string(),
        }
    }
}
