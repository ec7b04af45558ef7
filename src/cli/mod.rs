//! CLI argument parsing for the scheduler.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scheduled trigger for the CCADB to OneCRL import.
///
/// On each trigger the protected credentials are decrypted, the child
/// environment is assembled and `salesforce2OneCRL` is run to completion.
#[derive(Parser, Debug)]
#[command(name = "ccadb-import-scheduler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML configuration file. Built-in defaults apply when omitted.
    #[arg(long, global = true, env = "SCHEDULER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Handle one scheduled trigger.
    ///
    /// Decrypts configured credentials, runs the import binary and exits
    /// non-zero if the import fails.
    Run(RunArgs),

    /// Show what a trigger would run.
    ///
    /// Prints the binary, arguments and credential targets without
    /// decrypting anything or starting the binary.
    Plan(PlanArgs),

    /// Diagnose the deployment.
    ///
    /// Reports a missing or non-executable binary, an unavailable
    /// decryption command and other configuration problems.
    Doctor,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// JSON file holding the trigger event (ignored by the import).
    #[arg(long)]
    pub event: Option<PathBuf>,

    /// JSON file holding the trigger context (ignored by the import).
    #[arg(long)]
    pub context: Option<PathBuf>,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli = Cli::try_parse_from(["ccadb-import-scheduler", "run"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert!(args.event.is_none());
            assert!(args.context.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_with_payloads() {
        let cli = Cli::try_parse_from([
            "ccadb-import-scheduler",
            "run",
            "--event",
            "event.json",
            "--context",
            "context.json",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.event, Some(PathBuf::from("event.json")));
            assert_eq!(args.context, Some(PathBuf::from("context.json")));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_plan() {
        let cli = Cli::try_parse_from(["ccadb-import-scheduler", "plan"]).unwrap();
        if let Command::Plan(args) = cli.command {
            assert!(!args.json);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn parse_plan_json() {
        let cli = Cli::try_parse_from(["ccadb-import-scheduler", "plan", "--json"]).unwrap();
        if let Command::Plan(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn parse_doctor() {
        let cli = Cli::try_parse_from(["ccadb-import-scheduler", "doctor"]).unwrap();
        assert!(matches!(cli.command, Command::Doctor));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ccadb-import-scheduler",
            "plan",
            "--config",
            "/etc/scheduler.yaml",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/scheduler.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["ccadb-import-scheduler"]).is_err());
    }
}
