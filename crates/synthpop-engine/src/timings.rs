//! Wall-clock phase breakdown for a seeding run.

use serde::Serialize;

/// Milliseconds spent in each phase of `run_on_team`.
///
/// Recorded in the run's completed ledger row and surfaced in the run
/// report, so slow fixtures can be narrowed down to a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseTimings {
    /// Project setup: team rename and action definitions
    pub setup_ms: u64,
    /// Matrix simulation (zero when journeys are skipped)
    pub simulation_ms: u64,
    /// Group writes to the analytics store
    pub groups_ms: u64,
    /// Per-person analytics writes (persons, distinct IDs, events)
    pub individual_ms: u64,
    /// App-store bulk insert transaction
    pub bulk_ms: u64,
    /// Action event recomputation
    pub actions_ms: u64,
}

impl PhaseTimings {
    /// Sum of all phases
    pub fn total_ms(&self) -> u64 {
        self.setup_ms
            + self.simulation_ms
            + self.groups_ms
            + self.individual_ms
            + self.bulk_ms
            + self.actions_ms
    }
}
