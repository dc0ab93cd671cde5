//! Seeding orchestration.
//!
//! `MatrixManager` owns connections to both stores and walks a dataset
//! producer through the full pipeline for one team: project setup, then
//! simulation, group writes, per-person analytics writes, the app-store
//! bulk insert, and finally action event linkage.

#![allow(clippy::result_large_err)]

use crate::timings::PhaseTimings;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::time::Instant;
use synthpop_core::sim::Matrix;
use synthpop_core::{
    time_ordered_uuid, Action, Event, Group, GroupTypeIndex, Organization, Person,
    PersonDistinctId, Properties, RunId, SimDataError, SimPerson, Team, User,
};
use synthpop_store::analytics::AnalyticsRepo;
use synthpop_store::errors::{from_rusqlite, Result};
use synthpop_store::repo::AppRepo;
use synthpop_store::{db, ledger, migrations};

/// Knobs for a seeding run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Simulate journeys and persist the resulting dataset. With this off
    /// the run only re-applies project setup and relinks action events.
    pub simulate_journeys: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            simulate_journeys: true,
        }
    }
}

/// What one seeding run persisted
///
/// Counts cover this run only. When journeys are skipped everything but
/// `actions_recomputed` stays zero.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub team_id: i64,
    pub run_id: String,
    pub dataset_digest: Option<String>,
    /// People the matrix produced, seen or not
    pub people_simulated: usize,
    /// People bulk-created in the app store (those with a first_seen_at)
    pub people_saved: usize,
    pub distinct_ids_saved: usize,
    pub events_saved: usize,
    pub groups_saved: usize,
    pub actions_recomputed: usize,
    pub timings: PhaseTimings,
}

/// Drives seeding runs against the app and analytics stores
pub struct MatrixManager {
    app: Connection,
    analytics: Connection,
}

impl MatrixManager {
    /// Open both stores on disk, applying migrations
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(app_path: P, analytics_path: Q) -> Result<Self> {
        Self::from_connections(db::open(app_path)?, db::open(analytics_path)?)
    }

    /// Open both stores in memory, for tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connections(db::open_in_memory()?, db::open_in_memory()?)
    }

    /// Wrap existing connections, applying migrations to each
    pub fn from_connections(mut app: Connection, mut analytics: Connection) -> Result<Self> {
        migrations::apply_app_migrations(&mut app)?;
        migrations::apply_analytics_migrations(&mut analytics)?;
        Ok(Self { app, analytics })
    }

    /// App store connection
    pub fn app(&self) -> &Connection {
        &self.app
    }

    /// Analytics store connection
    pub fn analytics(&self) -> &Connection {
        &self.analytics
    }

    /// Create a demo team under an organization and seed it with defaults
    pub fn create_team_and_run<M: Matrix>(
        &mut self,
        matrix: &mut M,
        organization: &Organization,
        user: &User,
        team_name: &str,
    ) -> Result<RunReport> {
        let mut team = Team::new_demo(organization.id.clone(), team_name.to_string());
        AppRepo::create_team(&self.app, &mut team)?;
        self.run_on_team(matrix, &mut team, user, RunOptions::default())
    }

    /// Seed one team from the matrix
    ///
    /// The run is logged start to end and leaves ledger rows keyed by its
    /// run ID: a started row, a team_seeded row inside the bulk insert's
    /// transaction, and a completed row carrying counts and timings.
    pub fn run_on_team<M: Matrix>(
        &mut self,
        matrix: &mut M,
        team: &mut Team,
        user: &User,
        options: RunOptions,
    ) -> Result<RunReport> {
        let run_id = RunId::new();
        let start = Instant::now();
        synthpop_core::log_op_start!("run_on_team", run_id = run_id.as_str(), team_id = team.id);

        match self.run_inner(matrix, team, user, &options, &run_id) {
            Ok(report) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                synthpop_core::log_op_end!(
                    "run_on_team",
                    duration_ms = duration_ms,
                    run_id = run_id.as_str(),
                    people_count = report.people_saved,
                    events_count = report.events_saved
                );
                Ok(report)
            }
            Err(e) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                synthpop_core::log_op_error!(
                    "run_on_team",
                    e.clone(),
                    duration_ms = duration_ms,
                    run_id = run_id.as_str()
                );
                Err(e)
            }
        }
    }

    fn run_inner<M: Matrix>(
        &mut self,
        matrix: &mut M,
        team: &mut Team,
        user: &User,
        options: &RunOptions,
        run_id: &RunId,
    ) -> Result<RunReport> {
        let dataset_digest = matrix.dataset_digest();
        ledger::record_started(&self.app, run_id.as_str(), dataset_digest.as_deref())?;

        let mut timings = PhaseTimings::default();

        let phase = Instant::now();
        let setup = matrix.set_project_up(team, user)?;
        for spec in &setup.actions {
            let mut action = Action::new(team.id, spec.name.clone(), spec.event_name.clone());
            action.created_by = Some(user.id.clone());
            AppRepo::persist_action(&self.app, &mut action)?;
        }
        timings.setup_ms = phase.elapsed().as_millis() as u64;
        tracing::debug!(
            component = module_path!(),
            op = "run_on_team",
            duration_ms = timings.setup_ms,
            "project set up"
        );

        let mut people_simulated = 0;
        let mut people_saved = 0;
        let mut distinct_ids_saved = 0;
        let mut events_saved = 0;
        let mut groups_saved = 0;

        if options.simulate_journeys {
            let phase = Instant::now();
            matrix.simulate()?;
            timings.simulation_ms = phase.elapsed().as_millis() as u64;
            tracing::debug!(
                component = module_path!(),
                op = "run_on_team",
                people_count = matrix.people().len(),
                duration_ms = timings.simulation_ms,
                "journeys simulated"
            );

            let phase = Instant::now();
            for (type_index, groups) in matrix.groups() {
                for (group_key, group_properties) in groups {
                    self.save_sim_group(team.id, *type_index, group_key, group_properties)?;
                    groups_saved += 1;
                }
            }
            timings.groups_ms = phase.elapsed().as_millis() as u64;

            let phase = Instant::now();
            let sim_persons = matrix.people();
            people_simulated = sim_persons.len();
            let mut persons_to_bulk_save: Vec<Person> = Vec::new();
            let mut distinct_ids_to_bulk_save: Vec<PersonDistinctId> = Vec::new();
            for sim_person in sim_persons {
                // None means the person was never seen
                if let Some((person, mappings)) = self.save_sim_person(team.id, sim_person)? {
                    events_saved += sim_person.events.len();
                    persons_to_bulk_save.push(person);
                    distinct_ids_to_bulk_save.extend(mappings);
                }
            }
            timings.individual_ms = phase.elapsed().as_millis() as u64;
            tracing::debug!(
                component = module_path!(),
                op = "run_on_team",
                people_count = people_simulated,
                duration_ms = timings.individual_ms,
                "people saved individually"
            );

            let phase = Instant::now();
            people_saved = persons_to_bulk_save.len();
            distinct_ids_saved = distinct_ids_to_bulk_save.len();
            let tx = self.app.transaction().map_err(from_rusqlite)?;
            AppRepo::bulk_insert_persons(&tx, &persons_to_bulk_save)?;
            AppRepo::bulk_insert_distinct_ids(&tx, &distinct_ids_to_bulk_save)?;
            ledger::record_team_seeded_tx(
                &tx,
                run_id.as_str(),
                team.id,
                people_saved,
                distinct_ids_saved,
            )?;
            tx.commit().map_err(from_rusqlite)?;
            timings.bulk_ms = phase.elapsed().as_millis() as u64;
            tracing::debug!(
                component = module_path!(),
                op = "run_on_team",
                people_count = people_saved,
                duration_ms = timings.bulk_ms,
                "people saved in bulk"
            );
        }

        let phase = Instant::now();
        team.updated_at = Utc::now();
        AppRepo::update_team(&self.app, team)?;
        let actions = AppRepo::list_actions(&self.app, team.id)?;
        for action in &actions {
            self.calculate_action_events(action)?;
        }
        timings.actions_ms = phase.elapsed().as_millis() as u64;

        let report = RunReport {
            team_id: team.id,
            run_id: run_id.as_str().to_string(),
            dataset_digest,
            people_simulated,
            people_saved,
            distinct_ids_saved,
            events_saved,
            groups_saved,
            actions_recomputed: actions.len(),
            timings,
        };
        ledger::record_completed(
            &self.app,
            run_id.as_str(),
            json!({
                "team_id": report.team_id,
                "people_simulated": report.people_simulated,
                "people_saved": report.people_saved,
                "distinct_ids_saved": report.distinct_ids_saved,
                "events_saved": report.events_saved,
                "groups_saved": report.groups_saved,
                "actions_recomputed": report.actions_recomputed,
                "timings": report.timings,
            }),
        )?;
        Ok(report)
    }

    /// Persist one simulated person to the analytics store
    ///
    /// Returns the app-store rows to bulk-create later, or None for a
    /// person who never participated.
    pub fn save_sim_person(
        &self,
        team_id: i64,
        subject: &SimPerson,
    ) -> Result<Option<(Person, Vec<PersonDistinctId>)>> {
        let first_seen_at = match subject.first_seen_at {
            Some(at) => at,
            None => return Ok(None),
        };

        let person_uuid = time_ordered_uuid(first_seen_at);
        let person = Person::new(person_uuid, team_id, subject.properties.clone());
        AnalyticsRepo::create_person(&self.analytics, &person)?;

        let mut mappings = Vec::with_capacity(subject.distinct_ids.len());
        for distinct_id in &subject.distinct_ids {
            let mapping = PersonDistinctId::new(team_id, distinct_id.clone(), person_uuid);
            AnalyticsRepo::create_person_distinct_id(&self.analytics, &mapping)?;
            mappings.push(mapping);
        }

        for sim_event in &subject.events {
            let distinct_id =
                sim_event
                    .distinct_id()
                    .ok_or_else(|| SimDataError::MissingDistinctId {
                        event_name: sim_event.event.clone(),
                        timestamp: sim_event.timestamp.to_rfc3339(),
                    })?;
            let event = Event::new(
                time_ordered_uuid(sim_event.timestamp),
                sim_event.event.clone(),
                team_id,
                distinct_id.to_string(),
                sim_event.timestamp,
                sim_event.properties.clone(),
            );
            AnalyticsRepo::create_event(&self.analytics, &event)?;
        }

        Ok(Some((person, mappings)))
    }

    /// Persist one simulated group to the analytics store
    pub fn save_sim_group(
        &self,
        team_id: i64,
        type_index: GroupTypeIndex,
        group_key: &str,
        group_properties: &Properties,
    ) -> Result<Group> {
        let group = Group::new(
            team_id,
            type_index,
            group_key.to_string(),
            group_properties.clone(),
        );
        AnalyticsRepo::create_group(&self.analytics, &group)?;
        Ok(group)
    }

    /// Recompute one action's matching event set from the analytics store
    fn calculate_action_events(&mut self, action: &Action) -> Result<usize> {
        let event_uuids = AnalyticsRepo::list_event_uuids_by_name(
            &self.analytics,
            action.team_id,
            &action.event_name,
        )?;
        AppRepo::replace_action_events(&mut self.app, action.id, &event_uuids)
    }
}
