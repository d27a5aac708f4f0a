//! Assess a cylinder return and print the settlement commit instruction.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Args;

use cylrent_core::{Amount, Timestamp};
use cylrent_lease::{assess, Lease, ReturnCondition, ReturnDecision};

/// Arguments for `cylrent settle`.
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Path to a single lease record (JSON object).
    #[arg(long)]
    pub lease: PathBuf,

    /// Assessed cylinder condition: good, damaged, or needs_inspection.
    #[arg(long)]
    pub condition: String,

    /// Reference time, ISO8601 with Z suffix. Defaults to the current time.
    #[arg(long)]
    pub at: Option<String>,

    /// Override the computed refund (decimal string, within [0, deposit]).
    #[arg(long = "override")]
    pub refund_override: Option<String>,

    /// Damage description; required unless the condition is good.
    #[arg(long)]
    pub damage_notes: Option<String>,

    /// Free-form return notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Assess the lease, apply the operator decision, and print the
/// resulting return commit as JSON.
pub fn run(args: &SettleArgs) -> anyhow::Result<()> {
    let condition = ReturnCondition::from_str(&args.condition).map_err(anyhow::Error::msg)?;
    let now = match &args.at {
        Some(s) => Timestamp::parse(s).context("invalid --at timestamp")?,
        None => Timestamp::now(),
    };

    let raw = std::fs::read_to_string(&args.lease)
        .with_context(|| format!("reading {}", args.lease.display()))?;
    let lease: Lease = serde_json::from_str(&raw).context("parsing lease record")?;
    lease.check_invariants().context("lease record is malformed")?;

    let quote = assess(&lease, condition, now)?;
    tracing::info!(
        lease_id = %quote.lease_id,
        days_late = quote.days_late,
        refund = %quote.refund,
        "computed settlement quote"
    );

    let refund_override = args
        .refund_override
        .as_deref()
        .map(Amount::parse)
        .transpose()
        .context("invalid --override amount")?;

    let commit = quote.finalize(ReturnDecision {
        refund_override,
        damage_notes: args.damage_notes.clone(),
        notes: args.notes.clone(),
    })?;

    println!("{}", serde_json::to_string_pretty(&commit)?);
    Ok(())
}
