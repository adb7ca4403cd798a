//! # ricer-sync
//!
//! Bounded-parallel render orchestration.
//!
//! Call [`pipeline::run`] (or [`pipeline::run_blocking`]) to load the
//! configuration, discover templates and render each one through a
//! [`Throttle`] that keeps at most [`DEFAULT_CONCURRENCY`] jobs in flight.

pub mod error;
pub mod pipeline;
pub mod report;
pub mod throttle;

pub use error::SyncError;
pub use pipeline::{run, run_blocking, RunOptions, RunOutcome, RunSummary};
pub use report::Reporter;
pub use throttle::{Throttle, DEFAULT_CONCURRENCY};
