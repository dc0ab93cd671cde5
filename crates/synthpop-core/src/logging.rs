//! Logging facility built on tracing
//!
//! Provides:
//! - Profile-based subscriber initialization (development, production, test)
//! - Operation lifecycle macros emitting canonical start/end/end_error events
//!
//! Every emitted event carries the component, operation name and one of the
//! lifecycle event names from [`crate::schema`].

pub mod init;
pub mod macros;

pub use init::{init, Profile};
