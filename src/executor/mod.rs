//! Execution engine
//!
//! Provides sequential and parallel case execution and the run controller.

mod parallel;
mod runner;

pub use parallel::ParallelRunner;
pub use runner::{extract_record_id, CaseExecutor, HarnessRunner, RunContext};
