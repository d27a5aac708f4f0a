//! # cylrent-core — Foundational Types for CylRent
//!
//! This crate is the bedrock of the CylRent workspace. It defines the
//! primitives every other crate builds on: identifier newtypes, the
//! UTC-only `Timestamp`, the minor-unit `Amount`, and the cylinder and
//! outlet snapshot records the domain engines consume.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `LeaseId`, `CustomerId`,
//!    `CylinderId`, `OutletId`, `StaffId`, `TransferId` — all newtypes over
//!    UUIDs. No bare strings or raw UUIDs for identifiers, so a cylinder id
//!    cannot be passed where an outlet id is expected.
//!
//! 2. **Explicit clocks.** There is no implicit "current time" anywhere in
//!    the domain crates. Every derivation that depends on time takes a
//!    [`Timestamp`] parameter, which makes overdue/late-fee computation
//!    deterministic and testable.
//!
//! 3. **Integer money.** [`Amount`] holds minor units in an `i64` and all
//!    arithmetic is checked integer arithmetic. Currency crosses the caller
//!    boundary as decimal strings; it is never represented as a binary
//!    float inside this workspace.
//!
//! 4. **Snapshots, not live entities.** [`Cylinder`] and [`Outlet`] are
//!    caller-supplied reads. The domain crates validate and decide; the
//!    caller persists.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cylrent-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod cylinder;
pub mod error;
pub mod identity;
pub mod money;
pub mod outlet;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use cylinder::{Cylinder, CylinderSnapshotError, CylinderStatus};
pub use error::{MoneyError, TimestampError};
pub use identity::{CustomerId, CylinderId, LeaseId, OutletId, StaffId, TransferId};
pub use money::Amount;
pub use outlet::Outlet;
pub use temporal::Timestamp;
