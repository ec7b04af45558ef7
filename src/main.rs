//! ccadb-import-scheduler: scheduled trigger for the CCADB to OneCRL import.
//!
//! This is the main entry point. It parses arguments, sets up diagnostics,
//! dispatches to the command handler, and maps errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod credentials;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod invocation;
pub mod kms;
mod logging;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match commands::dispatch(cli.command, cli.config.as_deref()) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
