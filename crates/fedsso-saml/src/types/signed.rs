//! The signed-element capability.

use crate::error::{SamlError, SamlResult};
use crate::signature::VerificationKey;

/// A protocol element carrying a signature that can be checked against one
/// candidate key.
///
/// Implementations return `Ok(false)` for a well-formed signature that does
/// not verify under the key, and an error only for structurally broken
/// signature data. The trial validator depends on that distinction.
pub trait SignedElement {
    /// Checks the element's signature against the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature structure is malformed or the key
    /// cannot be applied.
    fn validate(&self, key: &VerificationKey) -> SamlResult<bool>;
}

/// The signed portion of a parsed protocol element.
///
/// The excluded XML layer extracts and canonicalizes the signed bytes and
/// the signature value; this type only carries them to the verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedDocument {
    /// Canonicalized bytes covered by the signature.
    data: Vec<u8>,
    /// Raw signature value.
    signature: Vec<u8>,
}

impl SignedDocument {
    /// Creates a signed document from its canonicalized bytes and signature
    /// value.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            signature: signature.into(),
        }
    }

    /// Returns the canonicalized signed bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl SignedElement for SignedDocument {
    fn validate(&self, key: &VerificationKey) -> SamlResult<bool> {
        if self.signature.is_empty() {
            return Err(SamlError::SignatureInvalid(
                "signature value is empty".to_string(),
            ));
        }
        Ok(key.verify(&self.data, &self.signature)?)
    }
}
