//! SAML Response types.
//!
//! Response messages received from an identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assertion::Assertion;
use super::signed::{SignedDocument, SignedElement};
use super::status::Status;
use crate::error::{SamlError, SamlResult};
use crate::signature::VerificationKey;

/// SAML Response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Unique identifier for this response.
    pub id: String,

    /// Version of the SAML protocol (always "2.0").
    #[serde(default = "default_version")]
    pub version: String,

    /// Timestamp when this response was issued.
    pub issue_instant: DateTime<Utc>,

    /// The entity ID of the identity provider that issued this response.
    pub issuer: String,

    /// The ID of the request this response is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,

    /// The URL where this response was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// The status of the response.
    pub status: Status,

    /// The assertions in this response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,

    /// The signed bytes of this response, when it arrived signed.
    #[serde(skip)]
    pub signature: Option<SignedDocument>,
}

fn default_version() -> String {
    "2.0".to_string()
}

impl Response {
    /// Creates a new success response.
    #[must_use]
    pub fn success(issuer: impl Into<String>) -> Self {
        Self {
            id: format!("_id{}", uuid::Uuid::new_v4()),
            version: "2.0".to_string(),
            issue_instant: Utc::now(),
            issuer: issuer.into(),
            in_response_to: None,
            destination: None,
            status: Status::success(),
            assertions: Vec::new(),
            signature: None,
        }
    }

    /// Sets the request ID this response is for.
    #[must_use]
    pub fn in_response_to(mut self, request_id: impl Into<String>) -> Self {
        self.in_response_to = Some(request_id.into());
        self
    }

    /// Sets the destination URL.
    #[must_use]
    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination = Some(url.into());
        self
    }

    /// Adds an assertion to this response.
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Attaches the signed bytes of this response.
    #[must_use]
    pub fn with_signature(mut self, signature: SignedDocument) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Returns true if this response indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the declared destination of this response.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Gets the first assertion if present.
    #[must_use]
    pub fn first_assertion(&self) -> Option<&Assertion> {
        self.assertions.first()
    }

    /// Validates the basic structure of this response.
    ///
    /// # Errors
    ///
    /// Returns an error when a required field is missing or the version is
    /// not supported. Structural checks only; business constraints run in
    /// the validation engine.
    pub fn check_structure(&self) -> SamlResult<()> {
        if self.id.is_empty() {
            return Err(SamlError::MissingElement("Response ID".to_string()));
        }
        if self.version != "2.0" {
            return Err(SamlError::InvalidResponse(format!(
                "Unsupported SAML version: {}",
                self.version
            )));
        }
        if self.issuer.is_empty() {
            return Err(SamlError::MissingElement("Issuer".to_string()));
        }
        Ok(())
    }
}

impl SignedElement for Response {
    fn validate(&self, key: &VerificationKey) -> SamlResult<bool> {
        self.signature
            .as_ref()
            .ok_or_else(|| SamlError::MissingElement("response Signature".to_string()))?
            .validate(key)
    }
}
