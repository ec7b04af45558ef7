use crate::error::{Result, ShimError};
use crate::kms::Decryptor;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// In-memory decryptor: plaintext is `decrypted:<ciphertext>`.
pub(crate) struct FakeDecryptor {
    seen: RefCell<Vec<Vec<u8>>>,
    failure: Option<String>,
}

impl FakeDecryptor {
    pub(crate) fn new() -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
            failure: None,
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.borrow().len()
    }

    pub(crate) fn seen(&self) -> Vec<Vec<u8>> {
        self.seen.borrow().clone()
    }
}

impl Decryptor for FakeDecryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<SecretString> {
        self.seen.borrow_mut().push(ciphertext.to_vec());
        if let Some(message) = &self.failure {
            return Err(ShimError::DecryptError(message.clone()));
        }
        Ok(SecretString::from(format!(
            "decrypted:{}",
            String::from_utf8_lossy(ciphertext)
        )))
    }
}

pub(crate) fn b64(plaintext: &str) -> String {
    STANDARD.encode(plaintext)
}

/// Write an executable shell script named `name` into `dir`.
#[cfg(unix)]
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Script body that records its arguments and environment next to itself,
/// then exits with `code`.
#[cfg(unix)]
pub(crate) fn recording_script(dir: &Path, code: i32) -> String {
    format!(
        "for a in \"$@\"; do echo \"$a\"; done > '{args}'\n/usr/bin/env > '{env}'\nexit {code}",
        args = dir.join("args.txt").display(),
        env = dir.join("env.txt").display(),
        code = code
    )
}

#[cfg(unix)]
pub(crate) fn recorded_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
pub(crate) fn recorded_env(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("env.txt")).unwrap()
}
