//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for one scheduled import.
///
/// Defaults describe the full-featured deployment: credentials decrypted
/// through KMS and the exceptions URL forwarded to the binary. Turning
/// `decrypt_credentials` or `pass_exceptions` off reproduces the reduced
/// deployments. Unknown fields in the YAML are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Binary location
    // =========================================================================
    /// Environment variable naming the directory that holds the binary.
    /// When unset in the environment, `.` is used.
    #[serde(default = "default_root_dir_var")]
    pub root_dir_var: String,

    /// File name of the import binary inside the root directory.
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    // =========================================================================
    // Arguments
    // =========================================================================
    /// Whether to pass `--exceptions <exceptions_url>`.
    #[serde(default = "default_true")]
    pub pass_exceptions: bool,

    /// URL of the exceptions JSON document.
    #[serde(default = "default_exceptions_url")]
    pub exceptions_url: String,

    /// Additional arguments appended after the exceptions pair.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,

    // =========================================================================
    // Credentials
    // =========================================================================
    /// Whether protected credentials are decrypted and injected at all.
    #[serde(default = "default_true")]
    pub decrypt_credentials: bool,

    /// Protected credentials, processed in order.
    #[serde(default = "default_credentials")]
    pub credentials: Vec<CredentialMapping>,

    /// Decryption command (shell-words parsed; no shell). Must contain
    /// `{ciphertext}`; prints the base64 plaintext on stdout.
    ///
    /// The default passes the ciphertext as base64 text to
    /// `--ciphertext-blob`, which AWS CLI v2 decodes by default. AWS CLI v1
    /// sends that text as raw bytes and KMS rejects it, so with v1 point
    /// this at a wrapper that decodes the ciphertext and passes `fileb://`.
    #[serde(default = "default_kms_command")]
    pub kms_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir_var: default_root_dir_var(),
            binary_name: default_binary_name(),
            pass_exceptions: default_true(),
            exceptions_url: default_exceptions_url(),
            extra_args: Vec::new(),
            decrypt_credentials: default_true(),
            credentials: default_credentials(),
            kms_command: default_kms_command(),
        }
    }
}
