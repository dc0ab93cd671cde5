//! Synthpop Core - domain models and simulation contracts
//!
//! This crate provides the foundational types for synthpop:
//! - App-store models (Organization, User, Team, Person, Action)
//! - Analytics models (Event, Group) and the five-slot group type index
//! - Simulation output types (SimPerson, SimEvent) and the Matrix contract
//! - Time-ordered UUID generation for person and event identities
//! - Error and logging facilities shared by the store and engine crates

pub mod correlation;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod model;
pub mod schema;
pub mod sim;

// Re-export commonly used types
pub use correlation::RunId;
pub use errors::{Result, SimDataError, SynthError, SynthErrorKind};
pub use ids::time_ordered_uuid;
pub use model::{
    Action, Event, Group, GroupTypeIndex, Organization, Person, PersonDistinctId, Properties, Team,
    User,
};
pub use sim::{ActionSpec, Matrix, ProjectSetup, SimEvent, SimGroups, SimPerson};
