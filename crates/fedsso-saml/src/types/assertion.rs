//! SAML Assertion types.
//!
//! Assertions contain statements about a subject made by an issuer. The
//! consumer reads them through typed getters; the constraint validators
//! never see raw XML.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fedsso_crypto::{AlgorithmBlacklist, DecryptionKey};

use super::name_id::{NameId, SubjectIdentifier};
use super::signed::{SignedDocument, SignedElement};
use crate::error::{SamlError, SamlResult};
use crate::signature::VerificationKey;

/// SAML Assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    /// Unique identifier for this assertion.
    pub id: String,

    /// Version of the SAML protocol (always "2.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Timestamp when this assertion was issued.
    pub issue_instant: DateTime<Utc>,

    /// The entity ID of the identity provider that issued this assertion.
    pub issuer: String,

    /// The subject of this assertion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,

    /// Conditions that must be evaluated for the assertion to be valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,

    /// Authentication statement describing how the subject authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authn_statement: Option<AuthnStatement>,

    /// The signed bytes of this assertion, when it arrived signed.
    #[serde(skip)]
    pub signature: Option<SignedDocument>,
}

fn default_version() -> String {
    "2.0".to_string()
}

impl Assertion {
    /// Creates a new assertion.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            id: format!("_id{}", uuid::Uuid::new_v4()),
            version: "2.0".to_string(),
            issue_instant: Utc::now(),
            issuer: issuer.into(),
            subject: None,
            conditions: None,
            authn_statement: None,
            signature: None,
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Sets the conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Sets the authentication statement.
    #[must_use]
    pub fn with_authn_statement(mut self, statement: AuthnStatement) -> Self {
        self.authn_statement = Some(statement);
        self
    }

    /// Attaches the signed bytes of this assertion.
    #[must_use]
    pub fn with_signature(mut self, signature: SignedDocument) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Returns the time at or after which the assertion is no longer valid.
    #[must_use]
    pub fn not_on_or_after(&self) -> Option<DateTime<Utc>> {
        self.conditions.as_ref().and_then(|c| c.not_on_or_after)
    }

    /// Returns the time before which the assertion is not yet valid.
    #[must_use]
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.conditions.as_ref().and_then(|c| c.not_before)
    }

    /// Returns the session expiry from the authentication statement.
    #[must_use]
    pub fn session_not_on_or_after(&self) -> Option<DateTime<Utc>> {
        self.authn_statement
            .as_ref()
            .and_then(|s| s.session_not_on_or_after)
    }

    /// Returns every audience named by the assertion's restrictions.
    #[must_use]
    pub fn audiences(&self) -> Vec<&str> {
        self.conditions
            .as_ref()
            .map(|c| {
                c.audience_restrictions
                    .iter()
                    .flat_map(|r| r.audiences.iter().map(String::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the subject confirmations of this assertion.
    #[must_use]
    pub fn subject_confirmations(&self) -> &[SubjectConfirmation] {
        self.subject
            .as_ref()
            .map(|s| s.subject_confirmations.as_slice())
            .unwrap_or_default()
    }

    /// Returns true if the subject identifier is still encrypted.
    #[must_use]
    pub fn is_name_id_encrypted(&self) -> bool {
        self.subject
            .as_ref()
            .is_some_and(|s| s.identifier.is_encrypted())
    }

    /// Returns the plaintext subject identifier, if available.
    #[must_use]
    pub fn name_id(&self) -> Option<&NameId> {
        self.subject.as_ref().and_then(|s| s.identifier.name_id())
    }

    /// Attempts to decrypt the subject identifier with one candidate key,
    /// replacing the encrypted variant with the recovered plaintext.
    ///
    /// # Errors
    ///
    /// Returns an error if the assertion has no subject, the identifier is
    /// not encrypted, or decryption with this candidate fails.
    pub fn decrypt_name_id(
        &mut self,
        key: &DecryptionKey,
        blacklist: &AlgorithmBlacklist,
    ) -> SamlResult<()> {
        let subject = self
            .subject
            .as_mut()
            .ok_or_else(|| SamlError::MissingElement("Subject".to_string()))?;

        match &subject.identifier {
            SubjectIdentifier::Plain(_) => Err(SamlError::InvalidAssertion(
                "subject identifier is not encrypted".to_string(),
            )),
            SubjectIdentifier::Encrypted(encrypted) => {
                let name_id = encrypted.decrypt(key, blacklist)?;
                subject.identifier = SubjectIdentifier::Plain(name_id);
                Ok(())
            }
        }
    }
}

impl SignedElement for Assertion {
    fn validate(&self, key: &VerificationKey) -> SamlResult<bool> {
        self.signature
            .as_ref()
            .ok_or_else(|| SamlError::MissingElement("assertion Signature".to_string()))?
            .validate(key)
    }
}

/// Subject of an assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// The identifier of the subject, possibly encrypted.
    pub identifier: SubjectIdentifier,

    /// Subject confirmations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_confirmations: Vec<SubjectConfirmation>,
}

impl Subject {
    /// Creates a subject with a plaintext name ID.
    #[must_use]
    pub fn new(name_id: NameId) -> Self {
        Self {
            identifier: SubjectIdentifier::Plain(name_id),
            subject_confirmations: Vec::new(),
        }
    }

    /// Creates a subject with an encrypted identifier.
    #[must_use]
    pub fn encrypted(identifier: super::name_id::EncryptedId) -> Self {
        Self {
            identifier: SubjectIdentifier::Encrypted(identifier),
            subject_confirmations: Vec::new(),
        }
    }

    /// Adds a subject confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: SubjectConfirmation) -> Self {
        self.subject_confirmations.push(confirmation);
        self
    }
}

/// Subject confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectConfirmation {
    /// The confirmation method URI.
    pub method: String,

    /// Additional confirmation data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_confirmation_data: Option<SubjectConfirmationData>,
}

impl SubjectConfirmation {
    /// Creates a bearer confirmation.
    #[must_use]
    pub fn bearer() -> Self {
        Self {
            method: super::constants::CM_BEARER.to_string(),
            subject_confirmation_data: None,
        }
    }

    /// Sets the confirmation data.
    #[must_use]
    pub fn with_data(mut self, data: SubjectConfirmationData) -> Self {
        self.subject_confirmation_data = Some(data);
        self
    }
}

/// Subject confirmation data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectConfirmationData {
    /// The request ID that this assertion responds to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,

    /// Time after which the subject can no longer be confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// Time before which the subject cannot be confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,

    /// The location to which the assertion may be presented.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl SubjectConfirmationData {
    /// Creates confirmation data tying the assertion to a request and
    /// recipient.
    #[must_use]
    pub fn for_request(request_id: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            in_response_to: Some(request_id.into()),
            recipient: Some(recipient.into()),
            not_on_or_after: None,
            not_before: None,
        }
    }

    /// Sets the recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }
}

/// Conditions for assertion validity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conditions {
    /// Time before which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,

    /// Time at or after which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// Audience restrictions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audience_restrictions: Vec<AudienceRestriction>,
}

impl Conditions {
    /// Creates empty conditions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expiry time.
    #[must_use]
    pub const fn with_not_on_or_after(mut self, instant: DateTime<Utc>) -> Self {
        self.not_on_or_after = Some(instant);
        self
    }

    /// Sets the start of validity.
    #[must_use]
    pub const fn with_not_before(mut self, instant: DateTime<Utc>) -> Self {
        self.not_before = Some(instant);
        self
    }

    /// Adds an audience restriction.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience_restrictions.push(AudienceRestriction {
            audiences: vec![audience.into()],
        });
        self
    }
}

/// Audience restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceRestriction {
    /// List of valid audiences.
    pub audiences: Vec<String>,
}

/// Authentication statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthnStatement {
    /// The time of authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authn_instant: Option<DateTime<Utc>>,

    /// The session index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_index: Option<String>,

    /// Time at which the session ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_not_on_or_after: Option<DateTime<Utc>>,
}

impl AuthnStatement {
    /// Creates an authentication statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session expiry.
    #[must_use]
    pub const fn with_session_not_on_or_after(mut self, instant: DateTime<Utc>) -> Self {
        self.session_not_on_or_after = Some(instant);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn assertion_getters_read_through_optional_layers() {
        let expiry = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let session_expiry = Utc.timestamp_opt(1_700_003_600, 0).unwrap();

        let assertion = Assertion::new("https://idp.example.org")
            .with_subject(Subject::new(NameId::persistent("user-1")))
            .with_conditions(
                Conditions::new()
                    .with_not_on_or_after(expiry)
                    .with_audience("https://sp.example.org"),
            )
            .with_authn_statement(
                AuthnStatement::new().with_session_not_on_or_after(session_expiry),
            );

        assert_eq!(assertion.not_on_or_after(), Some(expiry));
        assert_eq!(assertion.session_not_on_or_after(), Some(session_expiry));
        assert_eq!(assertion.audiences(), ["https://sp.example.org"]);
        assert!(!assertion.is_name_id_encrypted());
        assert_eq!(assertion.name_id().unwrap().value, "user-1");
    }

    #[test]
    fn bare_assertion_has_no_constraints() {
        let assertion = Assertion::new("https://idp.example.org");
        assert!(assertion.not_on_or_after().is_none());
        assert!(assertion.not_before().is_none());
        assert!(assertion.session_not_on_or_after().is_none());
        assert!(assertion.audiences().is_empty());
        assert!(assertion.subject_confirmations().is_empty());
    }

    #[test]
    fn decrypting_a_plaintext_identifier_is_an_error() {
        let mut assertion = Assertion::new("https://idp.example.org")
            .with_subject(Subject::new(NameId::new("user")));
        let key = fedsso_crypto::DecryptionKey::from_pem(include_str!(
            "../../tests/keys/rsa1.pem"
        ))
        .unwrap();

        let result = assertion.decrypt_name_id(&key, &AlgorithmBlacklist::new());
        assert!(matches!(result, Err(SamlError::InvalidAssertion(_))));
    }

    #[test]
    fn unsigned_assertion_reports_missing_signature() {
        let assertion = Assertion::new("https://idp.example.org");
        let cert = crate::certificate::Certificate::from_pem(include_str!(
            "../../tests/keys/cert1.pem"
        ))
        .unwrap();
        let key = VerificationKey::from_certificate(
            &cert,
            fedsso_crypto::SignatureAlgorithm::RsaSha256,
        )
        .unwrap();

        assert!(matches!(
            assertion.validate(&key),
            Err(SamlError::MissingElement(_))
        ));
    }
}
