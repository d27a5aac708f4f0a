//! # cylrent CLI Handlers
//!
//! File-driven command handlers for the `cylrent` binary. Each handler
//! reads caller-exported JSON snapshots, runs the domain engines, and
//! prints the decision as JSON — persistence stays with the exporting
//! system.

pub mod settle;
pub mod status;
