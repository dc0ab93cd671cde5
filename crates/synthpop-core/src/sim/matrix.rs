//! The dataset producer contract

use crate::errors::Result;
use crate::model::properties::Properties;
use crate::model::{GroupTypeIndex, Team, User};
use crate::sim::person::SimPerson;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group definitions produced by a simulation: slot, then group key, then
/// properties
pub type SimGroups = BTreeMap<GroupTypeIndex, BTreeMap<String, Properties>>;

/// Action definition a producer asks the project to carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Display name of the action
    pub name: String,
    /// Event name the action matches
    pub event_name: String,
}

/// Declarative project configuration returned by `set_project_up`
///
/// A producer adjusts the team in place (name, flags) and returns the
/// entities it wants defined. It never touches a database connection; the
/// run orchestrator applies this through the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSetup {
    /// Actions to define for the team
    pub actions: Vec<ActionSpec>,
}

/// Contract implemented by dataset producers.
///
/// A `Matrix` owns a simulated world. The run orchestrator drives it in two
/// steps: `set_project_up` to configure the team before any data is written,
/// then `simulate` to materialize people and groups, which are read back
/// through the accessors.
pub trait Matrix {
    /// Configure the project before any data is written
    fn set_project_up(&mut self, team: &mut Team, user: &User) -> Result<ProjectSetup>;

    /// Run the simulation to completion
    fn simulate(&mut self) -> Result<()>;

    /// Simulated people, available after `simulate`
    fn people(&self) -> &[SimPerson];

    /// Simulated groups keyed by type slot, available after `simulate`
    fn groups(&self) -> &SimGroups;

    /// Canonical digest of the backing dataset, if the producer has one
    fn dataset_digest(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_setup_defaults_to_no_actions() {
        let setup = ProjectSetup::default();
        assert!(setup.actions.is_empty());
    }

    #[test]
    fn action_spec_serializes_by_field_name() {
        let spec = ActionSpec {
            name: "Signed up".to_string(),
            event_name: "user signed up".to_string(),
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: ActionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
