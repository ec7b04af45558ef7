//! The import trigger.
//!
//! One linear sequence per trigger:
//!
//! - resolve the root directory and arguments ([`ImportPlan`])
//! - decrypt configured credentials into a fresh child environment
//! - print one diagnostic line
//! - run the binary and turn a non-zero exit into [`ShimError::ImportFailed`]

mod executor;
mod plan;


pub use executor::{ImportOutcome, execute_import};
pub use plan::{DEFAULT_ROOT_DIR, ImportPlan};

use crate::config::Config;
use crate::credentials::resolve_credentials;
use crate::env::Environment;
use crate::error::{Result, ShimError};
use crate::kms::Decryptor;
use serde_json::Value;
use std::io::Write;

/// Runs imports for one configuration.
pub struct ImportShim<'a> {
    config: &'a Config,
    decryptor: &'a dyn Decryptor,
}

impl<'a> ImportShim<'a> {
    pub fn new(config: &'a Config, decryptor: &'a dyn Decryptor) -> Self {
        Self { config, decryptor }
    }

    /// Handle one trigger, printing the diagnostic line to stdout.
    ///
    /// `event` and `context` come from the scheduling framework and are not
    /// interpreted.
    pub fn run_import(
        &self,
        event: &Value,
        context: &Value,
        env: &Environment,
    ) -> Result<ImportOutcome> {
        self.run_import_to(event, context, env, &mut std::io::stdout())
    }

    /// Same as [`run_import`](Self::run_import), writing the diagnostic line to `out`.
    pub fn run_import_to<W: Write>(
        &self,
        event: &Value,
        context: &Value,
        env: &Environment,
        out: &mut W,
    ) -> Result<ImportOutcome> {
        tracing::debug!(
            event = !event.is_null(),
            context = !context.is_null(),
            "import triggered"
        );

        let plan = ImportPlan::resolve(self.config, env);
        let child_env = resolve_credentials(env, self.config.active_credentials(), self.decryptor)?;

        writeln!(out, "{}", plan.diagnostic_line())
            .and_then(|_| out.flush())
            .map_err(|e| ShimError::UserError(format!("failed to write diagnostic line: {}", e)))?;

        let outcome = execute_import(&plan, &child_env)?;

        if !outcome.is_success() {
            tracing::error!(
                exit_code = ?outcome.exit_code,
                command = %outcome.command,
                "import binary failed"
            );
            return Err(ShimError::ImportFailed {
                code: outcome.exit_code,
            });
        }

        tracing::info!(
            started_at = %outcome.started_at.to_rfc3339(),
            duration_ms = outcome.duration().num_milliseconds(),
            "import finished"
        );
        Ok(outcome)
    }
}
