//! Configuration types and defaults for the scheduler.

use serde::{Deserialize, Serialize};

/// Canonical upstream exceptions document forwarded to the import binary.
pub const DEFAULT_EXCEPTIONS_URL: &str =
    "https://raw.githubusercontent.com/mozilla/OneCRL-Tools/master/salesforce2OneCRL/data/exceptions.json";

/// Placeholder in `kms_command` replaced by the base64 ciphertext.
pub const CIPHERTEXT_PLACEHOLDER: &str = "{ciphertext}";

/// One protected credential: an encrypted source variable and the plaintext
/// variable it becomes in the child environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMapping {
    /// Environment variable holding the base64 KMS ciphertext.
    pub source: String,
    /// Environment variable the plaintext is exported under for the child.
    pub target: String,
}

impl CredentialMapping {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Kinto username, Kinto password and Bugzilla API key.
pub fn default_credentials() -> Vec<CredentialMapping> {
    vec![
        CredentialMapping::new("PROTECTED_KINTO_USER", "kintouser"),
        CredentialMapping::new("PROTECTED_KINTO_PASS", "kintopass"),
        CredentialMapping::new("PROTECTED_BUGZILLA_KEY", "bzapikey"),
    ]
}

// Default value functions for serde
pub(crate) fn default_root_dir_var() -> String {
    "LAMBDA_TASK_ROOT".to_string()
}
pub(crate) fn default_binary_name() -> String {
    "salesforce2OneCRL".to_string()
}
pub(crate) fn default_exceptions_url() -> String {
    DEFAULT_EXCEPTIONS_URL.to_string()
}
pub(crate) fn default_kms_command() -> String {
    "aws kms decrypt --ciphertext-blob {ciphertext} --query Plaintext --output text".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
