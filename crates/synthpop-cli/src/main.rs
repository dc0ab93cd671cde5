//! Synthpop CLI
//!
//! Command-line interface for seeding demo datasets

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "synthpop")]
#[command(about = "Synthpop - Demo dataset seeding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed a team from a fixture file
    Seed(commands::seed::SeedArgs),
    /// Show what the stores hold
    Status(commands::status::StatusArgs),
}

fn main() {
    synthpop_core::logging::init(synthpop_core::logging::Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args),
        Commands::Status(args) => commands::status::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
