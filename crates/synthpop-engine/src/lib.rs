//! Synthpop Engine - Orchestration layer
//!
//! Drives a dataset producer (Matrix) against the app and analytics
//! stores: team setup, group and person persistence, bulk inserts, and
//! action event linkage.

pub mod manager;
pub mod timings;
