//! Simulation output types and the dataset producer contract
//!
//! Provides:
//! - `SimPerson` and `SimEvent`, the shapes a simulation hands over
//! - The `Matrix` trait implemented by dataset producers
//! - `ProjectSetup`, the declarative project configuration a producer requests

pub mod matrix;
pub mod person;

pub use matrix::{ActionSpec, Matrix, ProjectSetup, SimGroups};
pub use person::{SimEvent, SimPerson, DISTINCT_ID_PROPERTY};
