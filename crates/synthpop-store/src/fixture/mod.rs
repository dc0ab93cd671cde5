//! Fixture dataset import
//!
//! Provides:
//! - The Fixture Format v0 schema (YAML)
//! - The parser with structural validation
//! - Canonical digests identifying a dataset independent of formatting
//! - `FixtureMatrix`, bridging fixture files to the Matrix contract

pub mod digest;
pub mod format;
pub mod matrix;
pub mod parser;

pub use digest::compute_fixture_digest;
pub use format::FixtureV0;
pub use matrix::FixtureMatrix;
pub use parser::{parse_fixture_file, parse_fixture_str};
