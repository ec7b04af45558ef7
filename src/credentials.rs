//! Protected credential resolution.
//!
//! Each [`CredentialMapping`] is processed the same way: if its source
//! variable is present, the ciphertext is decoded, decrypted once and
//! exported under the target name in the child environment. A missing source
//! means the feature is not configured for this deployment.

use crate::config::CredentialMapping;
use crate::env::{ChildEnvironment, Environment};
use crate::error::Result;
use crate::kms::{Decryptor, decode_ciphertext};

/// Build the child environment for `env`, injecting every configured credential.
pub fn resolve_credentials(
    env: &Environment,
    mappings: &[CredentialMapping],
    decryptor: &dyn Decryptor,
) -> Result<ChildEnvironment> {
    let mut child = ChildEnvironment::new(env.clone());

    for mapping in mappings {
        let Some(encoded) = env.get(&mapping.source) else {
            tracing::debug!(source = %mapping.source, "protected credential not configured");
            continue;
        };

        let ciphertext = decode_ciphertext(&mapping.source, encoded)?;
        let plaintext = decryptor.decrypt(&ciphertext)?;
        child.insert_secret(&mapping.target, plaintext);

        tracing::info!(
            source = %mapping.source,
            target = %mapping.target,
            "injected protected credential"
        );
    }

    Ok(child)
}

/// Target keys that would be injected for `env`, without decrypting anything.
pub fn configured_targets<'a>(env: &Environment, mappings: &'a [CredentialMapping]) -> Vec<&'a str> {
    mappings
        .iter()
        .filter(|m| env.contains(&m.source))
        .map(|m| m.target.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_credentials;
    use crate::error::ShimError;
    use crate::test_support::{FakeDecryptor, b64};

    #[test]
    fn absent_ciphertexts_inject_nothing() {
        let env: Environment = [("PATH", "/bin")].into_iter().collect();
        let decryptor = FakeDecryptor::new();

        let child = resolve_credentials(&env, &default_credentials(), &decryptor).unwrap();

        assert_eq!(child.secret_keys().count(), 0);
        assert!(child.expose("kintouser").is_none());
        assert!(child.expose("kintopass").is_none());
        assert!(child.expose("bzapikey").is_none());
        assert_eq!(decryptor.calls(), 0);
    }

    #[test]
    fn present_ciphertext_is_decrypted_once_under_target() {
        let env: Environment = [
            ("PATH", "/bin".to_string()),
            ("PROTECTED_BUGZILLA_KEY", b64("bz-key")),
        ]
        .into_iter()
        .collect();
        let decryptor = FakeDecryptor::new();

        let child = resolve_credentials(&env, &default_credentials(), &decryptor).unwrap();

        assert_eq!(decryptor.calls(), 1);
        assert_eq!(decryptor.seen(), vec![b"bz-key".to_vec()]);
        assert_eq!(child.expose("bzapikey"), Some("decrypted:bz-key"));
        assert!(!child.has_secret("kintouser"));
        assert!(!child.has_secret("kintopass"));
    }

    #[test]
    fn all_three_credentials_are_processed_uniformly() {
        let env: Environment = [
            ("PROTECTED_KINTO_USER", b64("user")),
            ("PROTECTED_KINTO_PASS", b64("pass")),
            ("PROTECTED_BUGZILLA_KEY", b64("key")),
        ]
        .into_iter()
        .collect();
        let decryptor = FakeDecryptor::new();

        let child = resolve_credentials(&env, &default_credentials(), &decryptor).unwrap();

        assert_eq!(decryptor.calls(), 3);
        assert_eq!(child.expose("kintouser"), Some("decrypted:user"));
        assert_eq!(child.expose("kintopass"), Some("decrypted:pass"));
        assert_eq!(child.expose("bzapikey"), Some("decrypted:key"));
        // Ciphertext variables stay in the child environment untouched.
        assert_eq!(child.expose("PROTECTED_KINTO_USER"), Some(b64("user").as_str()));
    }

    #[test]
    fn malformed_ciphertext_stops_before_decrypting() {
        let env: Environment = [("PROTECTED_KINTO_USER", "%%%")].into_iter().collect();
        let decryptor = FakeDecryptor::new();

        let err = resolve_credentials(&env, &default_credentials(), &decryptor).unwrap_err();

        assert!(matches!(err, ShimError::DecryptError(_)));
        assert!(err.to_string().contains("PROTECTED_KINTO_USER"));
        assert_eq!(decryptor.calls(), 0);
    }

    #[test]
    fn decryptor_errors_propagate() {
        let env: Environment = [("PROTECTED_KINTO_PASS", b64("pass"))].into_iter().collect();
        let decryptor = FakeDecryptor::failing("KMS unavailable");

        let err = resolve_credentials(&env, &default_credentials(), &decryptor).unwrap_err();

        assert!(err.to_string().contains("KMS unavailable"));
    }

    #[test]
    fn configured_targets_follow_source_presence() {
        let env: Environment = [("PROTECTED_KINTO_PASS", "x"), ("PROTECTED_BUGZILLA_KEY", "y")]
            .into_iter()
            .collect();

        assert_eq!(
            configured_targets(&env, &default_credentials()),
            vec!["kintopass", "bzapikey"]
        );
        assert!(configured_targets(&Environment::default(), &default_credentials()).is_empty());
    }
}
