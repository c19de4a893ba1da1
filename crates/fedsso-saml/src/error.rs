//! SAML consumer error types.
//!
//! Only structural failures live here: malformed input, unusable key
//! material, exhausted trial loops. A message that was processed and found
//! *invalid* is not an error — those outcomes accumulate in a
//! [`ValidationResult`](crate::validation::ValidationResult).

use thiserror::Error;

/// Result type for SAML consumer operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML consumer errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// Invalid SAML response format or content.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid assertion.
    #[error("invalid assertion: {0}")]
    InvalidAssertion(String),

    /// Missing required element or attribute.
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// Signature validation failed structurally.
    #[error("signature validation failed: {0}")]
    SignatureInvalid(String),

    /// No configured key could decrypt an encrypted identifier.
    #[error("could not decrypt: {0}")]
    NotDecrypted(String),

    /// The message names an algorithm the configured parties refuse to use.
    #[error("blacklisted algorithm: {0}")]
    BlacklistedAlgorithm(String),

    /// Cryptographic operation error.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No metadata or configuration known for an entity.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}

impl From<fedsso_crypto::SignatureError> for SamlError {
    fn from(err: fedsso_crypto::SignatureError) -> Self {
        Self::SignatureInvalid(err.to_string())
    }
}

impl From<fedsso_crypto::EncryptionError> for SamlError {
    fn from(err: fedsso_crypto::EncryptionError) -> Self {
        Self::Crypto(err.to_string())
    }
}

impl From<serde_json::Error> for SamlError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidAssertion(format!("identifier payload: {err}"))
    }
}
