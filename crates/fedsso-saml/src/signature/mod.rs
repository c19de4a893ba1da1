//! Signature verification against candidate keys.

mod validator;

pub use validator::SignatureValidator;

use fedsso_crypto::{rsa_verify, SignatureAlgorithm, SignatureError};

use crate::certificate::Certificate;
use crate::error::SamlResult;

/// A public verification key extracted from a trusted certificate.
#[derive(Debug, Clone)]
pub struct VerificationKey {
    spki: Vec<u8>,
    algorithm: SignatureAlgorithm,
}

impl VerificationKey {
    /// Builds a verification key from a certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be parsed.
    pub fn from_certificate(
        certificate: &Certificate,
        algorithm: SignatureAlgorithm,
    ) -> SamlResult<Self> {
        Ok(Self {
            spki: certificate.public_key()?,
            algorithm,
        })
    }

    /// Builds a verification key directly from `SubjectPublicKeyInfo` DER.
    #[must_use]
    pub fn from_spki_der(spki: impl Into<Vec<u8>>, algorithm: SignatureAlgorithm) -> Self {
        Self {
            spki: spki.into(),
            algorithm,
        }
    }

    /// Returns the signature algorithm this key verifies with.
    #[must_use]
    pub const fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Verifies a signature over the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the key material cannot be used.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, SignatureError> {
        rsa_verify(&self.spki, data, signature, self.algorithm)
    }
}
