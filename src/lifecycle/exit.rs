//! Process exit codes.
//!
//! - 0: every endpoint healthy
//! - 1: at least one endpoint unhealthy
//! - 2: configuration, startup or engine error
//! - 130: interrupted

use crate::health::{EngineError, RunSummary};

pub const EXIT_HEALTHY: u8 = 0;
pub const EXIT_UNHEALTHY: u8 = 1;
pub const EXIT_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Exit code for a finished run.
pub fn exit_code(result: &Result<RunSummary, EngineError>) -> u8 {
    match result {
        Ok(summary) if summary.all_healthy() => EXIT_HEALTHY,
        Ok(_) => EXIT_UNHEALTHY,
        Err(_) => EXIT_ERROR,
    }
}
