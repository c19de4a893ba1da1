//! The multi-key signature trial.

use fedsso_core::config::IdentityProviderConfig;
use fedsso_crypto::SignatureAlgorithm;

use crate::certificate::{Certificate, KeyCollection};
use crate::error::{SamlError, SamlResult};
use crate::types::SignedElement;

use super::VerificationKey;

/// Validates signed elements against the candidate keys of a configured
/// party.
///
/// A party may be trusted under several certificates at once (key
/// rollover); a signature valid under any one of them is sufficient, and a
/// single broken candidate must never mask a later valid one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureValidator;

impl SignatureValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a signed element against an identity provider's configured
    /// certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if no certificates are configured, a certificate
    /// PEM is unreadable, or every candidate failed with an error.
    pub fn validate(
        &self,
        element: &dyn SignedElement,
        identity_provider: &IdentityProviderConfig,
    ) -> SamlResult<bool> {
        let candidates: KeyCollection<Certificate> = identity_provider
            .certificates
            .iter()
            .map(|pem| Certificate::from_pem(pem))
            .collect::<SamlResult<_>>()?;

        if candidates.is_empty() {
            return Err(SamlError::Config(format!(
                "no certificates configured for \"{}\"",
                identity_provider.entity_id
            )));
        }

        self.validate_element_with_keys(element, &candidates)
    }

    /// Tries the element's signature against each candidate in store order.
    ///
    /// The first candidate that verifies wins and ends the trial. A clean
    /// non-match moves on to the next candidate. A candidate that fails
    /// with an error (unparseable certificate, unusable key, malformed
    /// signature data) is logged and skipped; its error is only surfaced
    /// if the whole store is exhausted without a success, and then only the
    /// last one observed.
    ///
    /// # Errors
    ///
    /// Returns the last per-candidate error when no candidate verified and
    /// at least one failed with an error.
    pub fn validate_element_with_keys(
        &self,
        element: &dyn SignedElement,
        candidates: &KeyCollection<Certificate>,
    ) -> SamlResult<bool> {
        let mut last_error: Option<SamlError> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let key =
                match VerificationKey::from_certificate(candidate, SignatureAlgorithm::RsaSha256) {
                    Ok(key) => key,
                    Err(e) => {
                        tracing::debug!(
                            "Validation with key \"#{index}\" failed with exception: {e}"
                        );
                        last_error = Some(e);
                        continue;
                    }
                };

            match element.validate(&key) {
                Ok(true) => {
                    tracing::debug!("Validation with key \"#{index}\" succeeded");
                    return Ok(true);
                }
                Ok(false) => {
                    tracing::debug!("Validation with key \"#{index}\" failed without exception.");
                }
                Err(e) => {
                    tracing::debug!("Validation with key \"#{index}\" failed with exception: {e}");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Ok(false),
        }
    }
}
