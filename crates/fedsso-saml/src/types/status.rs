//! SAML Status types.

use serde::{Deserialize, Serialize};

use super::constants::status_codes;

/// SAML protocol status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// The status code URI.
    pub status_code: String,

    /// Optional nested sub-status code URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_status_code: Option<String>,

    /// Optional status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl Status {
    /// Creates a success status.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status_code: status_codes::SUCCESS.to_string(),
            sub_status_code: None,
            status_message: None,
        }
    }

    /// Creates an authentication-failed status.
    #[must_use]
    pub fn authn_failed(message: impl Into<String>) -> Self {
        Self {
            status_code: status_codes::RESPONDER.to_string(),
            sub_status_code: Some(status_codes::AUTHN_FAILED.to_string()),
            status_message: Some(message.into()),
        }
    }

    /// Returns true if this status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == status_codes::SUCCESS
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success()
    }
}
