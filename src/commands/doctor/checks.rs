//! Health check functions for the doctor command.

use crate::config::Config;
use crate::env::Environment;
use crate::invocation::ImportPlan;
use crate::kms::decode_ciphertext;
use std::path::Path;

use super::{DoctorReport, Issue, IssueSeverity};

/// Check that `PATH` is set; the child and the decryption command rely on it.
pub fn check_path(env: &Environment, report: &mut DoctorReport) {
    if env.get("PATH").is_none_or(str::is_empty) {
        report.issues.push(
            Issue::new(IssueSeverity::Warning, "missing_path", "PATH is not set")
                .with_remediation("Programs referenced by name (such as the AWS CLI) will not be found"),
        );
    }
}

/// Check that the root directory exists.
pub fn check_root_dir(plan: &ImportPlan, report: &mut DoctorReport) {
    if !Path::new(&plan.root_dir).is_dir() {
        report.issues.push(
            Issue::new(
                IssueSeverity::Error,
                "missing_root_dir",
                "Root directory does not exist",
            )
            .with_path(&plan.root_dir)
            .with_remediation(&format!(
                "Set {} to the directory containing the import binary",
                plan.root_dir_var
            )),
        );
    }
}

/// Check that the import binary exists and is executable.
pub fn check_binary(plan: &ImportPlan, report: &mut DoctorReport) {
    let binary = &plan.binary;
    let path = binary.display().to_string();

    let metadata = match std::fs::metadata(binary) {
        Ok(metadata) => metadata,
        Err(_) => {
            report.issues.push(
                Issue::new(
                    IssueSeverity::Error,
                    "missing_binary",
                    "Import binary does not exist",
                )
                .with_path(&path)
                .with_remediation("Deploy the binary alongside the scheduler or fix binary_name"),
            );
            return;
        }
    };

    if !metadata.is_file() {
        report.issues.push(
            Issue::new(
                IssueSeverity::Error,
                "binary_not_file",
                "Import binary path is not a regular file",
            )
            .with_path(&path),
        );
        return;
    }

    if !is_executable(&metadata) {
        report.issues.push(
            Issue::new(
                IssueSeverity::Error,
                "binary_not_executable",
                "Import binary is not executable",
            )
            .with_path(&path)
            .with_remediation(&format!("chmod +x {}", path)),
        );
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Check that every present ciphertext is valid base64.
pub fn check_ciphertexts(config: &Config, env: &Environment, report: &mut DoctorReport) {
    for mapping in config.active_credentials() {
        let Some(encoded) = env.get(&mapping.source) else {
            continue;
        };
        if let Err(e) = decode_ciphertext(&mapping.source, encoded) {
            report.issues.push(
                Issue::new(
                    IssueSeverity::Error,
                    "malformed_ciphertext",
                    &e.to_string(),
                )
                .with_path(&mapping.source)
                .with_remediation("Re-encrypt the value with KMS and store the base64 output"),
            );
        }
    }
}

/// Check the decryption setup against the credentials present in `env`.
pub fn check_decryptor(config: &Config, env: &Environment, report: &mut DoctorReport) {
    if !config.decrypt_credentials {
        return;
    }

    let present = config
        .credentials
        .iter()
        .filter(|m| env.contains(&m.source))
        .count();

    if present == 0 {
        let sources: Vec<&str> = config.credentials.iter().map(|m| m.source.as_str()).collect();
        report.issues.push(
            Issue::new(
                IssueSeverity::Warning,
                "no_credentials",
                "Decryption is enabled but no protected credentials are present",
            )
            .with_remediation(&format!(
                "Set any of {} or disable decrypt_credentials",
                sources.join(", ")
            )),
        );
        return;
    }

    let Ok(args) = config.kms_command_args() else {
        return;
    };
    let program = &args[0];
    if find_program(program, env.get("PATH")).is_none() {
        report.issues.push(
            Issue::new(
                IssueSeverity::Error,
                "missing_kms_command",
                "Decryption command was not found",
            )
            .with_path(program)
            .with_remediation("Install the AWS CLI or point kms_command at an available program"),
        );
    }
}

/// Resolve `program` the way a spawn would: paths as-is, names through `PATH`.
pub fn find_program(program: &str, path_var: Option<&str>) -> Option<std::path::PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    std::env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}
