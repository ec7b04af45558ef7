//! Import subprocess executor.
//!
//! Runs the import binary to completion with inherited stdio and the
//! prepared child environment. There is no timeout: the scheduler that
//! triggered the run owns that policy.

use super::plan::ImportPlan;
use crate::env::ChildEnvironment;
use crate::error::{Result, ShimError};
use chrono::{DateTime, Utc};
use std::process::Command;

/// Result of running the import binary.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Exit code of the process (None if killed by a signal).
    pub exit_code: Option<i32>,
    /// When the binary was started.
    pub started_at: DateTime<Utc>,
    /// When the binary exited.
    pub finished_at: DateTime<Utc>,
    /// The command that was executed (for logging).
    pub command: String,
}

impl ImportOutcome {
    /// Check if the import succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Execute the import binary described by `plan`.
///
/// # Returns
///
/// * `Ok(ImportOutcome)` - The binary ran; check `is_success()`
/// * `Err(ShimError::LaunchError)` - The binary could not be started
pub fn execute_import(plan: &ImportPlan, child_env: &ChildEnvironment) -> Result<ImportOutcome> {
    let mut command = Command::new(&plan.binary);
    command.args(&plan.args);
    child_env.apply_to(&mut command);

    let started_at = Utc::now();
    let status = command.status().map_err(|e| {
        ShimError::LaunchError(format!(
            "failed to execute import binary '{}': {}\n\
             Fix: check that {} points at the directory containing the binary and that it is executable.",
            plan.binary.display(),
            e,
            plan.root_dir_var
        ))
    })?;
    let finished_at = Utc::now();

    Ok(ImportOutcome {
        exit_code: status.code(),
        started_at,
        finished_at,
        command: plan.command_line(),
    })
}
