//! Repository layer for the app store

pub mod hydration;
pub mod sqlite_repo;
pub mod summary;

pub use sqlite_repo::AppRepo;
pub use summary::TeamSummary;
