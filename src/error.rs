//! Error types for the scheduler.
//!
//! Uses thiserror for derive macros. Every variant maps to a distinct exit code
//! so the trigger framework can tell a bad deployment from a failed import.

use crate::exit_codes;
use thiserror::Error;

/// Fixed message surfaced when the import binary reports failure.
pub const IMPORT_FAILED_MESSAGE: &str =
    "CCADB import failed! Check the logs for more information.";

/// Main error type for scheduler operations.
#[derive(Error, Debug)]
pub enum ShimError {
    /// Invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A protected credential could not be decrypted.
    #[error("Decryption failed: {0}")]
    DecryptError(String),

    /// The import binary could not be started.
    #[error("Launch failed: {0}")]
    LaunchError(String),

    /// The import binary exited with a non-zero status (or was killed).
    #[error("{}", IMPORT_FAILED_MESSAGE)]
    ImportFailed {
        /// Exit code reported by the child, `None` when terminated by a signal.
        code: Option<i32>,
    },
}

impl ShimError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShimError::UserError(_) => exit_codes::USER_ERROR,
            ShimError::DecryptError(_) => exit_codes::DECRYPT_FAILURE,
            ShimError::LaunchError(_) => exit_codes::LAUNCH_FAILURE,
            ShimError::ImportFailed { .. } => exit_codes::IMPORT_FAILURE,
        }
    }
}

/// Result type alias for scheduler operations.
pub type Result<T> = std::result::Result<T, ShimError>;
