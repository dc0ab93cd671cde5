//! Seed command
//!
//! Usage: synthpop seed <FIXTURE> [--team-name <NAME>] [--skip-journeys]

use clap::Args;
use std::path::PathBuf;
use synthpop_core::{Organization, Team, User};
use synthpop_engine::manager::{MatrixManager, RunOptions};
use synthpop_store::fixture::FixtureMatrix;
use synthpop_store::repo::AppRepo;
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Path to the fixture YAML file
    pub fixture: PathBuf,

    /// App store database path
    #[arg(long, default_value = ".synthpop/app.db")]
    pub app_db: PathBuf,

    /// Analytics store database path
    #[arg(long, default_value = ".synthpop/analytics.db")]
    pub analytics_db: PathBuf,

    /// Team name (default: the fixture's dataset name)
    #[arg(long)]
    pub team_name: Option<String>,

    /// Organization name to create or reuse
    #[arg(long, default_value = "Synthpop Demo Org")]
    pub organization: String,

    /// Email of the user to create or reuse
    #[arg(long, default_value = "demo@synthpop.dev")]
    pub email: String,

    /// Skip journey simulation; only apply setup and relink actions
    #[arg(long)]
    pub skip_journeys: bool,
}

/// Execute seed command
pub fn execute(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    for db_path in [&args.app_db, &args.analytics_db] {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    println!("Loading {}...", args.fixture.display());
    let mut matrix = FixtureMatrix::from_path(&args.fixture)?;

    let mut manager = MatrixManager::open(&args.app_db, &args.analytics_db)?;

    let organization = get_or_create_organization(&manager, &args.organization)?;
    let user = get_or_create_user(&manager, &args.email)?;

    let team_name = args
        .team_name
        .clone()
        .unwrap_or_else(|| matrix.dataset_name().to_string());
    let mut team = Team::new_demo(organization.id.clone(), team_name);
    AppRepo::create_team(manager.app(), &mut team)?;

    let report = manager.run_on_team(
        &mut matrix,
        &mut team,
        &user,
        RunOptions {
            simulate_journeys: !args.skip_journeys,
        },
    )?;

    println!(
        "✓ Seeded team {} '{}' (run {})",
        report.team_id, team.name, report.run_id
    );
    println!(
        "  people: {} saved of {} simulated",
        report.people_saved, report.people_simulated
    );
    println!("  distinct ids: {}", report.distinct_ids_saved);
    println!("  events: {}", report.events_saved);
    println!("  groups: {}", report.groups_saved);
    println!("  actions relinked: {}", report.actions_recomputed);
    println!("  took {} ms", report.timings.total_ms());
    if let Some(digest) = &report.dataset_digest {
        println!("  dataset digest: {}", digest);
    }

    Ok(())
}

fn get_or_create_organization(
    manager: &MatrixManager,
    name: &str,
) -> Result<Organization, Box<dyn std::error::Error>> {
    if let Some(existing) = AppRepo::find_organization_by_name(manager.app(), name)? {
        return Ok(existing);
    }
    let organization = Organization::new(Uuid::now_v7().to_string(), name.to_string());
    AppRepo::persist_organization(manager.app(), &organization)?;
    Ok(organization)
}

fn get_or_create_user(
    manager: &MatrixManager,
    email: &str,
) -> Result<User, Box<dyn std::error::Error>> {
    if let Some(existing) = AppRepo::find_user_by_email(manager.app(), email)? {
        return Ok(existing);
    }
    let first_name = email.split('@').next().unwrap_or("Demo").to_string();
    let user = User::new(Uuid::now_v7().to_string(), email.to_string(), first_name);
    AppRepo::persist_user(manager.app(), &user)?;
    Ok(user)
}
