//! Subject name identifiers, plaintext and encrypted.

use serde::{Deserialize, Serialize};

use fedsso_crypto::{
    encryption::{aes_gcm_open, aes_gcm_seal, generate_content_key},
    AlgorithmBlacklist, DecryptionKey, EncryptionAlgorithm, EncryptionKey,
};

use super::constants::NameIdFormat;
use crate::error::{SamlError, SamlResult};

/// SAML Name ID.
///
/// The identifier of the authenticated subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameId {
    /// The actual identifier value.
    pub value: String,

    /// The format of the name identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// The security or administrative domain that qualifies the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_qualifier: Option<String>,

    /// The service provider's entity ID that qualifies the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp_name_qualifier: Option<String>,
}

impl NameId {
    /// Creates a new name ID with the given value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: None,
            name_qualifier: None,
            sp_name_qualifier: None,
        }
    }

    /// Creates a new persistent name ID.
    #[must_use]
    pub fn persistent(value: impl Into<String>) -> Self {
        Self::new(value).with_format(NameIdFormat::Persistent)
    }

    /// Creates a new transient name ID.
    #[must_use]
    pub fn transient(value: impl Into<String>) -> Self {
        Self::new(value).with_format(NameIdFormat::Transient)
    }

    /// Sets the format for this name ID.
    #[must_use]
    pub fn with_format(mut self, format: NameIdFormat) -> Self {
        self.format = Some(format.uri().to_string());
        self
    }

    /// Sets the name qualifier.
    #[must_use]
    pub fn with_name_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.name_qualifier = Some(qualifier.into());
        self
    }

    /// Sets the SP name qualifier.
    #[must_use]
    pub fn with_sp_name_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.sp_name_qualifier = Some(qualifier.into());
        self
    }

    /// Returns the parsed name ID format.
    #[must_use]
    pub fn parsed_format(&self) -> NameIdFormat {
        self.format
            .as_deref()
            .and_then(NameIdFormat::from_uri)
            .unwrap_or_default()
    }
}

/// A subject identifier that is either plaintext or still encrypted.
///
/// Decryption does not mutate shared state: the transformer replaces an
/// `Encrypted` value with a freshly built `Plain` one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectIdentifier {
    /// A plaintext name identifier.
    Plain(NameId),
    /// An encrypted name identifier awaiting decryption.
    Encrypted(EncryptedId),
}

impl SubjectIdentifier {
    /// Returns true if the identifier is still encrypted.
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }

    /// Returns the plaintext identifier, if available.
    #[must_use]
    pub const fn name_id(&self) -> Option<&NameId> {
        match self {
            Self::Plain(name_id) => Some(name_id),
            Self::Encrypted(_) => None,
        }
    }
}

impl From<NameId> for SubjectIdentifier {
    fn from(name_id: NameId) -> Self {
        Self::Plain(name_id)
    }
}

/// An encrypted name identifier.
///
/// Hybrid format: a fresh content key sealed the identifier payload with
/// AES-GCM and was itself wrapped with RSA-OAEP for the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedId {
    /// XML-Enc URI of the content encryption algorithm.
    pub data_algorithm: String,

    /// XML-Enc URI of the key-transport algorithm.
    pub key_algorithm: String,

    /// The RSA-OAEP wrapped content key.
    #[serde(with = "serde_bytes_b64")]
    pub encrypted_key: Vec<u8>,

    /// Nonce-prefixed AES-GCM cipher value of the identifier payload.
    #[serde(with = "serde_bytes_b64")]
    pub cipher_value: Vec<u8>,
}

impl EncryptedId {
    /// Encrypts a name identifier for the holder of the given key.
    ///
    /// The consumer side uses this for round-trip tests and local tooling;
    /// in production the asserting party produces the encrypted form.
    ///
    /// # Errors
    ///
    /// Returns an error if key generation or either encryption step fails.
    pub fn seal(
        name_id: &NameId,
        recipient_key: &EncryptionKey,
        algorithm: EncryptionAlgorithm,
    ) -> SamlResult<Self> {
        let payload = serde_json::to_vec(name_id)?;
        let content_key = generate_content_key(algorithm)?;
        let cipher_value = aes_gcm_seal(algorithm, &content_key, &payload)?;
        let encrypted_key = recipient_key.wrap_key(&content_key)?;

        Ok(Self {
            data_algorithm: algorithm.uri().to_string(),
            key_algorithm: EncryptionAlgorithm::RsaOaep.uri().to_string(),
            encrypted_key,
            cipher_value,
        })
    }

    /// Attempts to decrypt this identifier with one candidate key.
    ///
    /// The blacklist is consulted before any key material is touched, so a
    /// message naming a refused algorithm fails identically for every
    /// candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if an algorithm is blacklisted or unknown, if the
    /// wrapped key was not produced for this candidate, or if the payload
    /// does not open.
    pub fn decrypt(
        &self,
        key: &DecryptionKey,
        blacklist: &AlgorithmBlacklist,
    ) -> SamlResult<NameId> {
        if blacklist.contains(&self.key_algorithm) {
            return Err(SamlError::BlacklistedAlgorithm(self.key_algorithm.clone()));
        }
        if blacklist.contains(&self.data_algorithm) {
            return Err(SamlError::BlacklistedAlgorithm(self.data_algorithm.clone()));
        }

        let data_algorithm = EncryptionAlgorithm::from_uri(&self.data_algorithm)
            .filter(|a| a.key_len().is_some())
            .ok_or_else(|| {
                SamlError::Crypto(format!(
                    "unsupported content algorithm: {}",
                    self.data_algorithm
                ))
            })?;
        if EncryptionAlgorithm::from_uri(&self.key_algorithm)
            != Some(EncryptionAlgorithm::RsaOaep)
        {
            return Err(SamlError::Crypto(format!(
                "unsupported key-transport algorithm: {}",
                self.key_algorithm
            )));
        }

        let content_key = key.unwrap_key(&self.encrypted_key)?;
        let payload = aes_gcm_open(data_algorithm, &content_key, &self.cipher_value)?;
        let name_id: NameId = serde_json::from_slice(&payload)?;
        Ok(name_id)
    }
}

mod serde_bytes_b64 {
    //! Cipher values serialize as base64 strings, matching how they travel
    //! in protocol messages.

    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
