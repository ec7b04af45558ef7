//! Command implementations for the scheduler.
//!
//! This module provides the dispatcher that loads configuration once and
//! routes CLI commands to their implementations.

mod doctor;
mod plan;
mod run;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Configuration is
/// loaded (and validated) before any command runs.
pub fn dispatch(command: Command, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    match command {
        Command::Run(args) => run::cmd_run(args, &config),
        Command::Plan(args) => plan::cmd_plan(args, &config),
        Command::Doctor => doctor::cmd_doctor(&config),
    }
}
