//! Implementation of the `doctor` command.
//!
//! Diagnoses the deployment without decrypting anything or running the import.
//!
//! Reports:
//! - Missing `PATH`
//! - Root directory that does not exist
//! - Import binary that is missing, not a file, or not executable
//! - Protected credentials whose ciphertext is not valid base64
//! - Decryption command that cannot be found when credentials are configured
//! - Decryption enabled but no protected credentials present

mod checks;
mod display;


use crate::config::Config;
use crate::env::Environment;
use crate::error::{Result, ShimError};
use crate::invocation::ImportPlan;

pub use checks::*;
pub use display::*;

/// Severity level for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Warning: the import will run but may not do what is expected.
    Warning,
    /// Error: the import will fail.
    Error,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "WARNING"),
            IssueSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// A detected issue with a recommended fix.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Severity level.
    pub severity: IssueSeverity,
    /// Category of the issue.
    pub category: String,
    /// Description of the issue.
    pub description: String,
    /// Path or variable involved.
    pub path: Option<String>,
    /// Recommended remediation.
    pub remediation: Option<String>,
}

impl Issue {
    pub fn new(severity: IssueSeverity, category: &str, description: &str) -> Self {
        Self {
            severity,
            category: category.to_string(),
            description: description.to_string(),
            path: None,
            remediation: None,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }
}

/// Result of running the doctor checks.
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// List of detected issues.
    pub issues: Vec<Issue>,
}

impl DoctorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error)
    }

    pub fn count(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Categories of the detected issues, in detection order.
    #[cfg(test)]
    pub fn categories(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.category.as_str()).collect()
    }
}

/// Run every check against `env`.
pub fn diagnose(config: &Config, env: &Environment) -> DoctorReport {
    let plan = ImportPlan::resolve(config, env);
    let mut report = DoctorReport::new();

    check_path(env, &mut report);
    check_root_dir(&plan, &mut report);
    check_binary(&plan, &mut report);
    check_ciphertexts(config, env, &mut report);
    check_decryptor(config, env, &mut report);

    report
}

/// Execute the `doctor` command.
pub fn cmd_doctor(config: &Config) -> Result<()> {
    let env = Environment::capture();
    let report = diagnose(config, &env);

    print_report(&report);

    if report.has_errors() {
        return Err(ShimError::UserError(format!(
            "Found {} error(s). The import would fail in this environment.",
            report.count(IssueSeverity::Error)
        )));
    }

    Ok(())
}
