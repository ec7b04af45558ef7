//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CIPHERTEXT_PLACEHOLDER;
use crate::error::{Result, ShimError};
use std::collections::HashSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ShimError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ShimError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if given, otherwise return validated defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::load(path)
            }
            None => {
                tracing::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ShimError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `root_dir_var` must be non-empty
    /// - `binary_name` must be non-empty and contain no path separators
    /// - `exceptions_url` must be non-empty when `pass_exceptions` is set
    /// - credential `source`/`target` must be non-empty; targets must be unique
    /// - `kms_command` must parse, be non-empty and contain `{ciphertext}`
    pub fn validate(&self) -> Result<()> {
        if self.root_dir_var.trim().is_empty() {
            return Err(invalid("root_dir_var must be non-empty"));
        }

        if self.binary_name.trim().is_empty() {
            return Err(invalid("binary_name must be non-empty"));
        }
        if self.binary_name.contains('/') || self.binary_name.contains('\\') {
            return Err(ShimError::UserError(format!(
                "config validation failed: binary_name must be a file name, not a path (found '{}'). Set {} to choose the directory.",
                self.binary_name, self.root_dir_var
            )));
        }

        if self.pass_exceptions && self.exceptions_url.trim().is_empty() {
            return Err(invalid(
                "exceptions_url must be non-empty when pass_exceptions is enabled",
            ));
        }

        let mut targets = HashSet::new();
        for mapping in &self.credentials {
            if mapping.source.trim().is_empty() || mapping.target.trim().is_empty() {
                return Err(invalid("credentials entries need a non-empty source and target"));
            }
            if !targets.insert(mapping.target.as_str()) {
                return Err(ShimError::UserError(format!(
                    "config validation failed: credential target '{}' is listed more than once",
                    mapping.target
                )));
            }
        }

        self.kms_command_args()?;

        Ok(())
    }

    /// Split `kms_command` into program and arguments.
    ///
    /// The `{ciphertext}` placeholder is left in place.
    pub fn kms_command_args(&self) -> Result<Vec<String>> {
        let args = shell_words::split(&self.kms_command).map_err(|e| {
            ShimError::UserError(format!(
                "config validation failed: failed to parse kms_command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.kms_command, e
            ))
        })?;

        if args.is_empty() {
            return Err(invalid("kms_command must be non-empty"));
        }
        if !args.iter().any(|arg| arg.contains(CIPHERTEXT_PLACEHOLDER)) {
            return Err(ShimError::UserError(format!(
                "config validation failed: kms_command must reference {} (found '{}')",
                CIPHERTEXT_PLACEHOLDER, self.kms_command
            )));
        }

        Ok(args)
    }

    /// Credential mappings that take part in an invocation.
    ///
    /// Empty when `decrypt_credentials` is disabled.
    pub fn active_credentials(&self) -> &[super::CredentialMapping] {
        if self.decrypt_credentials {
            &self.credentials
        } else {
            &[]
        }
    }
}

fn invalid(reason: &str) -> ShimError {
    ShimError::UserError(format!("config validation failed: {}", reason))
}
