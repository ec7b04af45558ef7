//! Key-management decryption.
//!
//! Protected credentials arrive as base64 KMS ciphertext. Decryption goes
//! through the [`Decryptor`] trait; the production implementation runs an
//! external command (the AWS CLI by default) with captured stdout/stderr and
//! structured error handling.

use crate::config::{CIPHERTEXT_PLACEHOLDER, Config};
use crate::error::{Result, ShimError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use std::process::Command;

/// Turns ciphertext bytes into plaintext.
pub trait Decryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString>;
}

/// Decode the base64 value of the protected variable `source`.
pub fn decode_ciphertext(source: &str, encoded: &str) -> Result<Vec<u8>> {
    STANDARD.decode(encoded.trim()).map_err(|e| {
        ShimError::DecryptError(format!("{}: ciphertext is not valid base64: {}", source, e))
    })
}

/// Decrypts by running a configured command.
///
/// Every argument has `{ciphertext}` replaced by the base64 ciphertext. The
/// command must exit 0 and print the base64 plaintext on stdout, which is
/// what `aws kms decrypt --query Plaintext --output text` does.
#[derive(Debug, Clone)]
pub struct KmsCliDecryptor {
    args: Vec<String>,
}

impl KmsCliDecryptor {
    /// Build a decryptor from `kms_command`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            args: config.kms_command_args()?,
        })
    }

    /// The program that will be executed.
    pub fn program(&self) -> &str {
        &self.args[0]
    }

    fn render_args(&self, ciphertext_b64: &str) -> Vec<String> {
        self.args[1..]
            .iter()
            .map(|arg| arg.replace(CIPHERTEXT_PLACEHOLDER, ciphertext_b64))
            .collect()
    }
}

impl Decryptor for KmsCliDecryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString> {
        let program = self.program();
        let args = self.render_args(&STANDARD.encode(ciphertext));

        let output = Command::new(program).args(&args).output().map_err(|e| {
            ShimError::DecryptError(format!(
                "failed to execute kms command '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                program, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ShimError::DecryptError(format!(
                "kms command '{}' failed (exit code {}): {}",
                program,
                output.status.code().unwrap_or(-1),
                stderr
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let plaintext = STANDARD.decode(stdout.trim()).map_err(|e| {
            ShimError::DecryptError(format!(
                "kms command '{}' returned plaintext that is not valid base64: {}",
                program, e
            ))
        })?;

        let plaintext = String::from_utf8(plaintext).map_err(|_| {
            ShimError::DecryptError(format!(
                "kms command '{}' returned plaintext that is not valid UTF-8",
                program
            ))
        })?;

        Ok(SecretString::from(plaintext))
    }
}
