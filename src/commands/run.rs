//! Implementation of the `run` command.
//!
//! This is the scheduled trigger: it captures the process environment,
//! builds the KMS decryptor and hands both to [`ImportShim::run_import`].

use crate::cli::RunArgs;
use crate::config::Config;
use crate::env::Environment;
use crate::error::{Result, ShimError};
use crate::invocation::ImportShim;
use crate::kms::KmsCliDecryptor;
use serde_json::Value;
use std::path::Path;

/// Execute the `run` command.
pub fn cmd_run(args: RunArgs, config: &Config) -> Result<()> {
    let event = load_payload(args.event.as_deref(), "event")?;
    let context = load_payload(args.context.as_deref(), "context")?;

    let env = Environment::capture();
    let decryptor = KmsCliDecryptor::from_config(config)?;

    ImportShim::new(config, &decryptor).run_import(&event, &context, &env)?;
    Ok(())
}

/// Read a JSON trigger payload, `null` when no file is given.
fn load_payload(path: Option<&Path>, what: &str) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Null);
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        ShimError::UserError(format!(
            "failed to read {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ShimError::UserError(format!(
            "failed to parse {} file '{}' as JSON: {}",
            what,
            path.display(),
            e
        ))
    })
}
