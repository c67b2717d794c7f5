//! Orchestration: per-run assembly and the cross-design sweep
//!
//! [`assemble`] runs the fixed extraction sequence for one
//! (platform, design, variant) run and returns the completed record together
//! with its diagnostics. [`sweep`] repeats that over an explicit list of
//! discovered runs, merging each result into the cross-design aggregate as
//! it completes.
//!
//! Provenance that depends on ambient process state (clock, tool binaries,
//! repository checkouts) is resolved once into a [`RunContext`] before any
//! extraction starts, so assembly itself is a pure function of the context
//! and the files on disk.

mod collector;
mod discover;
mod run_context;
mod sweep;
mod toolver;

pub use collector::assemble;
pub use discover::{RunTriple, discover_runs};
pub use run_context::RunContext;
pub use sweep::{SweepOutcome, sweep};
