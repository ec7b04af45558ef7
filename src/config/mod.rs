//! Configuration model for the scheduler.
//!
//! This module defines the Config struct loaded from an optional YAML file.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults matching the full-featured deployment, and validation of values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{CIPHERTEXT_PLACEHOLDER, CredentialMapping, DEFAULT_EXCEPTIONS_URL};
