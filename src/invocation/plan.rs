//! Resolution of the import command line.

use crate::config::Config;
use crate::credentials::configured_targets;
use crate::env::Environment;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Root directory used when the root-directory variable is unset.
pub const DEFAULT_ROOT_DIR: &str = ".";

/// Everything needed to run the import binary, minus the secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    /// Name of the variable the root directory was read from.
    pub root_dir_var: String,
    /// Directory holding the binary.
    pub root_dir: String,
    /// `<root_dir>/<binary_name>`.
    pub binary: PathBuf,
    /// Arguments passed to the binary.
    pub args: Vec<String>,
    /// `PATH` of the parent environment, empty when unset.
    pub path: String,
    /// Credential targets that will be injected (values are never recorded).
    pub credential_targets: Vec<String>,
}

impl ImportPlan {
    /// Resolve the plan for `env` under `config`. Nothing is decrypted.
    pub fn resolve(config: &Config, env: &Environment) -> Self {
        let root_dir = env
            .get(&config.root_dir_var)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ROOT_DIR)
            .to_string();

        let binary = Path::new(&root_dir).join(&config.binary_name);

        let mut args = Vec::new();
        if config.pass_exceptions {
            args.push("--exceptions".to_string());
            args.push(config.exceptions_url.clone());
        }
        args.extend(config.extra_args.iter().cloned());

        let credential_targets = configured_targets(env, config.active_credentials())
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            root_dir_var: config.root_dir_var.clone(),
            root_dir,
            binary,
            args,
            path: env.get("PATH").unwrap_or_default().to_string(),
            credential_targets,
        }
    }

    /// Binary followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.binary.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The single line printed before the binary runs.
    pub fn diagnostic_line(&self) -> String {
        format!(
            "Calling CCADB import client using: PATH=\"{}\" {}=\"{}\" and args {}",
            self.path,
            self.root_dir_var,
            self.root_dir,
            self.command_line()
        )
    }
}
