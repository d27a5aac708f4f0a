//! # cylrent CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// CylRent CLI — gas-cylinder rental domain toolchain.
///
/// Resolves effective lease statuses and computes return settlements
/// from JSON snapshot files exported by the rental system.
#[derive(Parser, Debug)]
#[command(name = "cylrent", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve effective lease statuses at a reference time.
    Status(cylrent_cli::status::StatusArgs),
    /// Assess a cylinder return and print the settlement commit.
    Settle(cylrent_cli::settle::SettleArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status(args) => cylrent_cli::status::run(&args),
        Commands::Settle(args) => cylrent_cli::settle::run(&args),
    }
}
