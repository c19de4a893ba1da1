//! Certificates, loaded private keys, and the ordered key candidate store.

mod key_collection;
mod private_key_loader;

pub use key_collection::KeyCollection;
pub use private_key_loader::PrivateKeyLoader;

use fedsso_core::config::KeyName;
use fedsso_crypto::{pem::pem_to_der, DecryptionKey};

use crate::error::{SamlError, SamlResult};

/// An X.509 certificate carrying a verification key candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    /// Creates a certificate from DER bytes.
    #[must_use]
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }

    /// Creates a certificate from a PEM string.
    ///
    /// # Errors
    ///
    /// Returns an error if the PEM armor is invalid.
    pub fn from_pem(pem: &str) -> SamlResult<Self> {
        let der = pem_to_der(pem, "CERTIFICATE")
            .ok_or_else(|| SamlError::Crypto("Invalid certificate PEM".to_string()))?;
        Ok(Self::from_der(der))
    }

    /// Returns the DER bytes of this certificate.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Extracts the `SubjectPublicKeyInfo` from this certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be parsed.
    pub fn public_key(&self) -> SamlResult<Vec<u8>> {
        use x509_parser::prelude::*;

        let (_, cert) = X509Certificate::from_der(&self.der)
            .map_err(|e| SamlError::Crypto(format!("Failed to parse certificate: {e}")))?;

        Ok(cert.public_key().raw.to_vec())
    }
}

/// A private key as loaded from configuration: PEM contents plus the
/// metadata that arrived with it. Turning it into usable key material is a
/// separate, fallible step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    contents: String,
    name: KeyName,
    passphrase: Option<String>,
}

impl PrivateKey {
    /// Creates a loaded private key.
    #[must_use]
    pub fn new(contents: impl Into<String>, name: KeyName, passphrase: Option<String>) -> Self {
        Self {
            contents: contents.into(),
            name,
            passphrase,
        }
    }

    /// Returns the PEM contents of this key.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Returns the rollover name of this key.
    #[must_use]
    pub fn name(&self) -> KeyName {
        self.name
    }

    /// Returns the configured passphrase, if any.
    #[must_use]
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }

    /// Builds decryption key material from this key.
    ///
    /// # Errors
    ///
    /// Returns an error if the PEM is not a usable RSA key. Passphrase
    /// protected keys are rejected here: this layer has no PKCS#8 PBE
    /// support, so such keys must be decrypted before configuration.
    pub fn to_decryption_key(&self) -> SamlResult<DecryptionKey> {
        if self.passphrase.is_some() {
            return Err(SamlError::Config(
                "passphrase-protected private keys are not supported; \
                 decrypt the key before configuring it"
                    .to_string(),
            ));
        }
        let key = DecryptionKey::from_pem(&self.contents)?;
        Ok(match self.name {
            KeyName::Default => key.with_name("default"),
            KeyName::New => key.with_name("new"),
        })
    }
}
