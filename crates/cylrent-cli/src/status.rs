//! Resolve effective lease statuses from a JSON snapshot file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use cylrent_core::Timestamp;
use cylrent_lease::{resolve, Lease};

/// Arguments for `cylrent status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to a JSON array of lease records.
    #[arg(long)]
    pub leases: PathBuf,

    /// Reference time, ISO8601 with Z suffix. Defaults to the current time.
    #[arg(long)]
    pub at: Option<String>,
}

/// Resolve every lease in the file and print `{lease_id, status}` rows.
pub fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let now = match &args.at {
        Some(s) => Timestamp::parse(s).context("invalid --at timestamp")?,
        None => Timestamp::now(),
    };

    let raw = std::fs::read_to_string(&args.leases)
        .with_context(|| format!("reading {}", args.leases.display()))?;
    let leases: Vec<Lease> = serde_json::from_str(&raw).context("parsing lease records")?;

    let rows: Vec<serde_json::Value> = leases
        .iter()
        .map(|lease| {
            serde_json::json!({
                "lease_id": lease.id,
                "status": resolve(lease, now),
            })
        })
        .collect();

    tracing::info!(count = leases.len(), at = %now, "resolved lease statuses");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
