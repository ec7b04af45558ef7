//! Environment snapshots.
//!
//! The process environment is captured once into an immutable [`Environment`].
//! Everything downstream reads from that map, and the child process receives a
//! fresh [`ChildEnvironment`] built on top of it, so nothing mutates
//! process-wide state.

use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::Command;

/// Immutable copy of an environment.
///
/// Names and values are kept as raw OS strings so that variables which are
/// not valid UTF-8 still reach the child untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// Look up a variable. Values that are not valid UTF-8 read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(OsStr::new(key)).and_then(|v| v.to_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(OsStr::new(key))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Environment handed to the import binary: the parent snapshot plus secrets.
///
/// A secret whose key already exists in the base replaces that value.
pub struct ChildEnvironment {
    base: Environment,
    secrets: BTreeMap<String, SecretString>,
}

impl ChildEnvironment {
    pub fn new(base: Environment) -> Self {
        Self {
            base,
            secrets: BTreeMap::new(),
        }
    }

    /// Add a decrypted secret under `key`.
    pub fn insert_secret(&mut self, key: &str, value: SecretString) {
        self.secrets.insert(key.to_string(), value);
    }

    /// Keys of the injected secrets, in sorted order.
    pub fn secret_keys(&self) -> impl Iterator<Item = &str> {
        self.secrets.keys().map(String::as_str)
    }

    pub fn has_secret(&self, key: &str) -> bool {
        self.secrets.contains_key(key)
    }

    /// Look up a plain or secret value. Secrets are exposed.
    pub fn expose(&self, key: &str) -> Option<&str> {
        match self.secrets.get(key) {
            Some(secret) => Some(secret.expose_secret()),
            None => self.base.get(key),
        }
    }

    /// Replace the environment of `command` with this one.
    pub fn apply_to(&self, command: &mut Command) {
        command.env_clear();
        command.envs(self.base.iter());
        for (key, value) in &self.secrets {
            command.env(key, value.expose_secret());
        }
    }
}

impl fmt::Debug for ChildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildEnvironment")
            .field("base_vars", &self.base.len())
            .field("secrets", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}
