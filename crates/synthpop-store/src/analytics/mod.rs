//! Analytics event store
//!
//! Row-at-a-time ingestion mirroring how events arrive in production, plus
//! the read side used for action recomputation and status reporting.

pub mod event_repo;

pub use event_repo::AnalyticsRepo;
