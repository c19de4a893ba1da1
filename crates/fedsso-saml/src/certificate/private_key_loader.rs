//! Turning configured key references into loaded keys.

use std::fs;

use fedsso_core::config::{
    IdentityProviderConfig, KeyName, KeySource, PrivateKeyConfig, ServiceProviderConfig,
};
use fedsso_crypto::DecryptionKey;

use crate::error::{SamlError, SamlResult};

use super::{KeyCollection, PrivateKey};

/// Loads private keys referenced by party configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateKeyLoader;

impl PrivateKeyLoader {
    /// Creates a loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves one configured key reference into its PEM contents.
    ///
    /// # Errors
    ///
    /// Returns an error if a file-backed key cannot be read.
    pub fn load_private_key(&self, config: &PrivateKeyConfig) -> SamlResult<PrivateKey> {
        let contents = match &config.source {
            KeySource::File(path) => fs::read_to_string(path).map_err(|e| {
                SamlError::Config(format!(
                    "could not read private key file {}: {e}",
                    path.display()
                ))
            })?,
            KeySource::Contents(contents) => contents.clone(),
        };

        Ok(PrivateKey::new(
            contents,
            config.name,
            config.passphrase.clone(),
        ))
    }

    /// Assembles the decryption-key candidate store for a validating pair.
    ///
    /// Trial order supports rollover: the service provider's `new` key
    /// first, its `default` key next, then any identity-provider configured
    /// keys in configuration order.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured key cannot be loaded or is not
    /// usable RSA key material.
    pub fn load_decryption_keys(
        &self,
        identity_provider: &IdentityProviderConfig,
        service_provider: &ServiceProviderConfig,
    ) -> SamlResult<KeyCollection<DecryptionKey>> {
        let mut keys = KeyCollection::new();

        if let Some(new_key) = service_provider.private_key(KeyName::New) {
            keys.add(self.load_private_key(new_key)?.to_decryption_key()?);
        }
        if let Some(default_key) = service_provider.private_key(KeyName::Default) {
            keys.add(self.load_private_key(default_key)?.to_decryption_key()?);
        }
        for key_config in &identity_provider.private_keys {
            keys.add(self.load_private_key(key_config)?.to_decryption_key()?);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedsso_core::config::PrivateKeyConfig;

    const RSA1_PEM: &str = include_str!("../../tests/keys/rsa1.pem");
    const RSA2_PEM: &str = include_str!("../../tests/keys/rsa2.pem");

    #[test]
    fn loads_inline_contents() {
        let loader = PrivateKeyLoader::new();
        let config = PrivateKeyConfig::from_contents(RSA1_PEM, KeyName::Default);

        let key = loader.load_private_key(&config).unwrap();
        assert_eq!(key.contents(), RSA1_PEM);
        assert_eq!(key.name(), KeyName::Default);
        assert!(key.passphrase().is_none());
    }

    #[test]
    fn loads_key_from_file() {
        let loader = PrivateKeyLoader::new();
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/keys/rsa1.pem");
        let config = PrivateKeyConfig::from_file(path, KeyName::Default);

        let key = loader.load_private_key(&config).unwrap();
        assert_eq!(key.contents(), RSA1_PEM);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let loader = PrivateKeyLoader::new();
        let config = PrivateKeyConfig::from_file("/nonexistent/key.pem", KeyName::Default);
        assert!(matches!(
            loader.load_private_key(&config),
            Err(SamlError::Config(_))
        ));
    }

    #[test]
    fn passphrase_travels_with_the_key() {
        let loader = PrivateKeyLoader::new();
        let config = PrivateKeyConfig::from_contents(RSA1_PEM, KeyName::Default)
            .with_passphrase("foo bar baz");

        let key = loader.load_private_key(&config).unwrap();
        assert_eq!(key.passphrase(), Some("foo bar baz"));
    }

    #[test]
    fn rollover_key_is_tried_before_default() {
        let loader = PrivateKeyLoader::new();
        let idp = IdentityProviderConfig::new("https://idp.example.org");
        let sp = ServiceProviderConfig::new("https://sp.example.org")
            .with_private_key(PrivateKeyConfig::from_contents(RSA1_PEM, KeyName::Default))
            .with_private_key(PrivateKeyConfig::from_contents(RSA2_PEM, KeyName::New));

        let keys = loader.load_decryption_keys(&idp, &sp).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.get(0).unwrap().name(), Some("new"));
        assert_eq!(keys.get(1).unwrap().name(), Some("default"));
    }
}
