//! Database migrations
//!
//! Each store carries its own embedded migration set and its own
//! schema_version table.

mod checksums;
mod embedded;
mod runner;

pub use runner::{apply_analytics_migrations, apply_app_migrations};
