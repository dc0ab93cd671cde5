//! Synthpop Store - persistence for seeded demo datasets
//!
//! Provides:
//! - The SQLite app store (organizations, teams, persons, actions) with an
//!   embedded migrations framework
//! - The SQLite analytics store (events, groups, person replicas)
//! - Fixture Format v0 parsing, canonical digests, and the FixtureMatrix
//!   dataset producer
//! - The seed-run ledger recording what each run wrote

#![allow(clippy::result_large_err)]

pub mod analytics;
pub mod db;
pub mod errors;
pub mod fixture;
pub mod ledger;
pub mod migrations;
pub mod repo;

pub use errors::Result;
