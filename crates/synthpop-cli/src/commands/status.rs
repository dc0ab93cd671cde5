//! Status command
//!
//! Usage: synthpop status [--app-db <PATH>] [--analytics-db <PATH>]

use clap::Args;
use std::path::PathBuf;
use synthpop_store::analytics::AnalyticsRepo;
use synthpop_store::ledger;
use synthpop_store::repo::summary::team_summaries;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// App store database path
    #[arg(long, default_value = ".synthpop/app.db")]
    pub app_db: PathBuf,

    /// Analytics store database path
    #[arg(long, default_value = ".synthpop/analytics.db")]
    pub analytics_db: PathBuf,
}

/// Execute status command
pub fn execute(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.app_db.exists() {
        return Err(format!(
            "no app store at {}; run `synthpop seed` first",
            args.app_db.display()
        )
        .into());
    }

    let app = rusqlite::Connection::open(&args.app_db)?;
    let summaries = team_summaries(&app)?;

    if summaries.is_empty() {
        println!("No teams seeded yet.");
        return Ok(());
    }

    // Events live in the other store; absent file just means zero counts
    let event_counts = if args.analytics_db.exists() {
        let analytics = rusqlite::Connection::open(&args.analytics_db)?;
        AnalyticsRepo::event_counts_by_team(&analytics)?
    } else {
        Vec::new()
    };

    for summary in &summaries {
        let events = event_counts
            .iter()
            .find(|(team_id, _)| *team_id == summary.team_id)
            .map(|(_, count)| *count)
            .unwrap_or(0);
        println!(
            "Team {} '{}': {} persons, {} distinct ids, {} actions, {} events",
            summary.team_id,
            summary.team_name,
            summary.persons,
            summary.distinct_ids,
            summary.actions,
            events
        );
    }

    let recent = ledger::list_recent_events(&app, 10)?;
    if !recent.is_empty() {
        println!();
        println!("Recent seed runs:");
        for event in &recent {
            let when = chrono::DateTime::from_timestamp(event.timestamp, 0)
                .unwrap_or_else(chrono::Utc::now)
                .format("%Y-%m-%d %H:%M:%S");
            println!("  {} {} (run {})", when, event.kind, event.correlation_id);
        }
    }

    Ok(())
}
