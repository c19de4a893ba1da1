//! Party configuration.
//!
//! Describes the two sides of a federated exchange as the orchestrator
//! configures them: which certificates a party is trusted under, which
//! private keys this deployment can decrypt with, and which algorithms a
//! party refuses to use. Built once per validating party and treated as
//! immutable for the lifetime of a validation request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use fedsso_crypto::AlgorithmBlacklist;

/// An expected endpoint URL, compared by exact string match.
///
/// No normalization is applied: `"https://sp.example.org/acs"` and
/// `"https://sp.example.org/acs/"` are different destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination(String);

impl Destination {
    /// Creates a destination from the raw URL string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the given value names this destination exactly.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The role a configured private key plays during key rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyName {
    /// The currently active key.
    #[default]
    Default,
    /// The incoming key during a rollover; tried before the default key.
    New,
}

/// Where a configured private key lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySource {
    /// A path to a PEM file on disk.
    File(PathBuf),
    /// Inline PEM contents.
    Contents(String),
}

/// A reference to a private key in party configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyConfig {
    /// Where the key material lives.
    pub source: KeySource,

    /// Rollover role of this key.
    #[serde(default)]
    pub name: KeyName,

    /// Optional passphrase for an encrypted key file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

impl PrivateKeyConfig {
    /// Creates a key reference pointing at a PEM file.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>, name: KeyName) -> Self {
        Self {
            source: KeySource::File(path.into()),
            name,
            passphrase: None,
        }
    }

    /// Creates a key reference carrying inline PEM contents.
    #[must_use]
    pub fn from_contents(contents: impl Into<String>, name: KeyName) -> Self {
        Self {
            source: KeySource::Contents(contents.into()),
            name,
            passphrase: None,
        }
    }

    /// Sets the passphrase.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

/// Configuration of the asserting party (the identity provider).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Entity ID of the identity provider.
    pub entity_id: String,

    /// PEM certificates this party is trusted under, in trial order.
    ///
    /// More than one certificate is normal during certificate rotation; a
    /// signature valid under any one of them is sufficient.
    #[serde(default)]
    pub certificates: Vec<String>,

    /// Private keys configured for this party, in configuration order.
    #[serde(default)]
    pub private_keys: Vec<PrivateKeyConfig>,

    /// Algorithms this party refuses to use. Takes precedence over the
    /// service provider's blacklist when both are configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklisted_algorithms: Option<AlgorithmBlacklist>,
}

impl IdentityProviderConfig {
    /// Creates a configuration with the given entity ID.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    /// Adds a trusted certificate (PEM).
    #[must_use]
    pub fn with_certificate(mut self, pem: impl Into<String>) -> Self {
        self.certificates.push(pem.into());
        self
    }

    /// Adds a configured private key.
    #[must_use]
    pub fn with_private_key(mut self, key: PrivateKeyConfig) -> Self {
        self.private_keys.push(key);
        self
    }

    /// Sets the algorithm blacklist.
    #[must_use]
    pub fn with_blacklisted_algorithms(mut self, blacklist: AlgorithmBlacklist) -> Self {
        self.blacklisted_algorithms = Some(blacklist);
        self
    }

    /// Returns the configured algorithm blacklist, if any.
    #[must_use]
    pub fn blacklisted_algorithms(&self) -> Option<&AlgorithmBlacklist> {
        self.blacklisted_algorithms.as_ref()
    }
}

/// Configuration of the relying party (this service provider).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceProviderConfig {
    /// Entity ID of the service provider.
    pub entity_id: String,

    /// Private keys this deployment can decrypt with, in configuration
    /// order. A key named [`KeyName::New`] is tried before the default key.
    #[serde(default)]
    pub private_keys: Vec<PrivateKeyConfig>,

    /// Algorithms this party refuses to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklisted_algorithms: Option<AlgorithmBlacklist>,
}

impl ServiceProviderConfig {
    /// Creates a configuration with the given entity ID.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    /// Adds a configured private key.
    #[must_use]
    pub fn with_private_key(mut self, key: PrivateKeyConfig) -> Self {
        self.private_keys.push(key);
        self
    }

    /// Sets the algorithm blacklist.
    #[must_use]
    pub fn with_blacklisted_algorithms(mut self, blacklist: AlgorithmBlacklist) -> Self {
        self.blacklisted_algorithms = Some(blacklist);
        self
    }

    /// Returns the configured algorithm blacklist, if any.
    #[must_use]
    pub fn blacklisted_algorithms(&self) -> Option<&AlgorithmBlacklist> {
        self.blacklisted_algorithms.as_ref()
    }

    /// Returns the first configured key with the given rollover name.
    #[must_use]
    pub fn private_key(&self, name: KeyName) -> Option<&PrivateKeyConfig> {
        self.private_keys.iter().find(|k| k.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_is_exact_match() {
        let destination = Destination::new("https://sp.example.org/acs");
        assert!(destination.matches("https://sp.example.org/acs"));
        assert!(!destination.matches("https://sp.example.org/acs/"));
        assert!(!destination.matches("HTTPS://SP.EXAMPLE.ORG/ACS"));
    }

    #[test]
    fn destination_displays_raw_value() {
        let destination = Destination::new("urn:destination");
        assert_eq!(destination.to_string(), "urn:destination");
    }

    #[test]
    fn service_provider_key_lookup_by_name() {
        let config = ServiceProviderConfig::new("https://sp.example.org")
            .with_private_key(PrivateKeyConfig::from_contents("old", KeyName::Default))
            .with_private_key(PrivateKeyConfig::from_contents("incoming", KeyName::New));

        let new_key = config.private_key(KeyName::New).unwrap();
        assert_eq!(new_key.source, KeySource::Contents("incoming".to_string()));
        assert!(config.private_key(KeyName::Default).is_some());
    }

    #[test]
    fn identity_provider_builder() {
        let config = IdentityProviderConfig::new("https://idp.example.org")
            .with_certificate("-----BEGIN CERTIFICATE-----")
            .with_blacklisted_algorithms(fedsso_crypto::AlgorithmBlacklist::recommended());

        assert_eq!(config.entity_id, "https://idp.example.org");
        assert_eq!(config.certificates.len(), 1);
        assert!(config.blacklisted_algorithms().is_some());
    }

    #[test]
    fn key_config_carries_passphrase() {
        let key = PrivateKeyConfig::from_file("/etc/sp/key.pem", KeyName::Default)
            .with_passphrase("foo bar baz");
        assert_eq!(key.passphrase.as_deref(), Some("foo bar baz"));
    }
}
