//! Assertion transformers.
//!
//! A transformer consumes an assertion and returns it, possibly rewritten.
//! The one transformer this consumer needs turns an encrypted subject
//! identifier back into plaintext.

use fedsso_core::config::{IdentityProviderConfig, ServiceProviderConfig};
use fedsso_crypto::AlgorithmBlacklist;

use crate::certificate::PrivateKeyLoader;
use crate::error::{SamlError, SamlResult};
use crate::types::Assertion;

/// A pass over a freshly parsed assertion.
pub trait Transformer {
    /// Transforms the assertion, returning the rewritten value.
    ///
    /// # Errors
    ///
    /// Returns an error when the assertion cannot be brought into the form
    /// the consumer requires.
    fn transform(&self, assertion: Assertion) -> SamlResult<Assertion>;
}

/// Decrypts an assertion's encrypted subject identifier by trying every
/// configured decryption key in order.
///
/// Failures on individual candidates are expected during key rollover and
/// are recorded in the debug log only; the trial is a failure solely when
/// every candidate has been exhausted and the identifier is still
/// encrypted.
pub struct NameIdDecryptionTransformer {
    private_key_loader: PrivateKeyLoader,
    identity_provider: IdentityProviderConfig,
    service_provider: ServiceProviderConfig,
}

impl NameIdDecryptionTransformer {
    /// Creates the transformer for a validating pair.
    #[must_use]
    pub fn new(
        private_key_loader: PrivateKeyLoader,
        identity_provider: IdentityProviderConfig,
        service_provider: ServiceProviderConfig,
    ) -> Self {
        Self {
            private_key_loader,
            identity_provider,
            service_provider,
        }
    }

    /// Resolves the effective algorithm blacklist for the pair: the
    /// identity provider's when configured, else the service provider's,
    /// else empty.
    fn effective_blacklist(&self) -> AlgorithmBlacklist {
        self.identity_provider
            .blacklisted_algorithms()
            .or_else(|| self.service_provider.blacklisted_algorithms())
            .cloned()
            .unwrap_or_default()
    }
}

impl Transformer for NameIdDecryptionTransformer {
    fn transform(&self, mut assertion: Assertion) -> SamlResult<Assertion> {
        if !assertion.is_name_id_encrypted() {
            return Ok(assertion);
        }

        let decryption_keys = self
            .private_key_loader
            .load_decryption_keys(&self.identity_provider, &self.service_provider)?;
        let blacklisted_algorithms = self.effective_blacklist();

        for (index, key) in decryption_keys.iter().enumerate() {
            match assertion.decrypt_name_id(key, &blacklisted_algorithms) {
                Ok(()) => {
                    tracing::debug!("Decrypted assertion NameId with key \"#{index}\"");
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        "Decrypting assertion NameId with key \"#{index}\" failed: \"{e}\""
                    );
                }
            }
        }

        if assertion.is_name_id_encrypted() {
            return Err(SamlError::NotDecrypted(
                "Could not decrypt the assertion NameId with the configured keys, \
                 see the debug log for information"
                    .to_string(),
            ));
        }

        Ok(assertion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EncryptedId, NameId, Subject};
    use fedsso_core::config::{KeyName, PrivateKeyConfig};
    use fedsso_crypto::{DecryptionKey, EncryptionAlgorithm};

    const RSA1_PEM: &str = include_str!("../../tests/keys/rsa1.pem");
    const RSA2_PEM: &str = include_str!("../../tests/keys/rsa2.pem");
    const RSA3_PEM: &str = include_str!("../../tests/keys/rsa3.pem");

    fn transformer_with_sp_keys(key_pems: &[&str]) -> NameIdDecryptionTransformer {
        let mut sp = ServiceProviderConfig::new("https://sp.example.org");
        for (position, pem) in key_pems.iter().enumerate() {
            // First configured key plays the rollover role.
            let name = if position == 0 && key_pems.len() > 1 {
                KeyName::New
            } else {
                KeyName::Default
            };
            sp = sp.with_private_key(PrivateKeyConfig::from_contents(*pem, name));
        }
        NameIdDecryptionTransformer::new(
            PrivateKeyLoader::new(),
            IdentityProviderConfig::new("https://idp.example.org"),
            sp,
        )
    }

    fn assertion_encrypted_for(key_pem: &str) -> Assertion {
        let name_id = NameId::persistent("subject-42");
        let recipient = DecryptionKey::from_pem(key_pem).unwrap();
        let encrypted = EncryptedId::seal(
            &name_id,
            &recipient.encryption_key().unwrap(),
            EncryptionAlgorithm::Aes256Gcm,
        )
        .unwrap();
        Assertion::new("https://idp.example.org").with_subject(Subject::encrypted(encrypted))
    }

    #[test]
    fn plaintext_assertion_passes_through_unchanged() {
        let transformer = transformer_with_sp_keys(&[RSA1_PEM]);
        let assertion = Assertion::new("https://idp.example.org")
            .with_subject(Subject::new(NameId::persistent("already-plain")));
        let id_before = assertion.id.clone();

        let transformed = transformer.transform(assertion).unwrap();

        assert_eq!(transformed.id, id_before);
        assert_eq!(transformed.name_id().unwrap().value, "already-plain");
    }

    #[test]
    fn matching_key_decrypts_the_identifier() {
        let transformer = transformer_with_sp_keys(&[RSA1_PEM]);
        let assertion = assertion_encrypted_for(RSA1_PEM);

        let transformed = transformer.transform(assertion).unwrap();

        assert!(!transformed.is_name_id_encrypted());
        assert_eq!(transformed.name_id().unwrap().value, "subject-42");
    }

    #[test]
    fn later_key_in_the_store_still_succeeds() {
        // Encrypted for the default key while a rollover key is configured
        // in front of it.
        let transformer = transformer_with_sp_keys(&[RSA2_PEM, RSA1_PEM]);
        let assertion = assertion_encrypted_for(RSA1_PEM);

        let transformed = transformer.transform(assertion).unwrap();

        assert!(!transformed.is_name_id_encrypted());
        assert_eq!(transformed.name_id().unwrap().value, "subject-42");
    }

    #[test]
    fn no_matching_key_is_a_not_decrypted_error() {
        let transformer = transformer_with_sp_keys(&[RSA2_PEM, RSA3_PEM]);
        let assertion = assertion_encrypted_for(RSA1_PEM);

        let result = transformer.transform(assertion);

        match result {
            Err(SamlError::NotDecrypted(message)) => {
                assert!(message.contains("debug log"));
            }
            other => panic!("expected NotDecrypted, got {other:?}"),
        }
    }

    #[test]
    fn identity_provider_blacklist_takes_precedence() {
        let idp = IdentityProviderConfig::new("https://idp.example.org")
            .with_blacklisted_algorithms(
                [EncryptionAlgorithm::Aes256Gcm.uri()].into_iter().collect(),
            );
        let sp = ServiceProviderConfig::new("https://sp.example.org")
            .with_private_key(PrivateKeyConfig::from_contents(RSA1_PEM, KeyName::Default))
            .with_blacklisted_algorithms(AlgorithmBlacklist::new());
        let transformer =
            NameIdDecryptionTransformer::new(PrivateKeyLoader::new(), idp, sp);
        let assertion = assertion_encrypted_for(RSA1_PEM);

        // The IdP refuses AES-256-GCM, so the matching key never applies.
        assert!(matches!(
            transformer.transform(assertion),
            Err(SamlError::NotDecrypted(_))
        ));
    }

    #[test]
    fn service_provider_blacklist_applies_when_idp_has_none() {
        let idp = IdentityProviderConfig::new("https://idp.example.org");
        let sp = ServiceProviderConfig::new("https://sp.example.org")
            .with_private_key(PrivateKeyConfig::from_contents(RSA1_PEM, KeyName::Default))
            .with_blacklisted_algorithms(
                [EncryptionAlgorithm::Aes256Gcm.uri()].into_iter().collect(),
            );
        let transformer =
            NameIdDecryptionTransformer::new(PrivateKeyLoader::new(), idp, sp);
        let assertion = assertion_encrypted_for(RSA1_PEM);

        assert!(matches!(
            transformer.transform(assertion),
            Err(SamlError::NotDecrypted(_))
        ));
    }
}
