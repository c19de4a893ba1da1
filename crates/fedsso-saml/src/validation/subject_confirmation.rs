//! Subject-confirmation constraint validators.

use fedsso_core::config::Destination;

use crate::types::SubjectConfirmation;

use super::{SubjectConfirmationConstraintValidator, ValidationResult};

/// Checks that the confirmation data's `Recipient` names this endpoint
/// exactly. Absent data or an absent recipient is no constraint.
pub struct SubjectConfirmationRecipientMatches {
    expected: Destination,
}

impl SubjectConfirmationRecipientMatches {
    /// Creates the validator with the expected recipient endpoint.
    #[must_use]
    pub fn new(expected: Destination) -> Self {
        Self { expected }
    }
}

impl SubjectConfirmationConstraintValidator for SubjectConfirmationRecipientMatches {
    fn validate(&self, confirmation: &SubjectConfirmation, result: &mut ValidationResult) {
        let recipient = confirmation
            .subject_confirmation_data
            .as_ref()
            .and_then(|data| data.recipient.as_deref());

        if let Some(recipient) = recipient {
            if !self.expected.matches(recipient) {
                result.add_error(format!(
                    "Recipient in SubjectConfirmationData \"{recipient}\" does not match \
                     the expected recipient \"{}\"",
                    self.expected
                ));
            }
        }
    }
}

/// Checks that the confirmation data's `InResponseTo` correlates with the
/// request this consumer sent. Absent data or an absent value is no
/// constraint.
pub struct SubjectConfirmationResponseToMatches {
    expected_in_response_to: String,
}

impl SubjectConfirmationResponseToMatches {
    /// Creates the validator with the request ID this consumer issued.
    #[must_use]
    pub fn new(expected_in_response_to: impl Into<String>) -> Self {
        Self {
            expected_in_response_to: expected_in_response_to.into(),
        }
    }
}

impl SubjectConfirmationConstraintValidator for SubjectConfirmationResponseToMatches {
    fn validate(&self, confirmation: &SubjectConfirmation, result: &mut ValidationResult) {
        let in_response_to = confirmation
            .subject_confirmation_data
            .as_ref()
            .and_then(|data| data.in_response_to.as_deref());

        if let Some(in_response_to) = in_response_to {
            if in_response_to != self.expected_in_response_to {
                result.add_error(format!(
                    "InResponseTo in SubjectConfirmationData \"{in_response_to}\" does not \
                     match the expected response to \"{}\"",
                    self.expected_in_response_to
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectConfirmationData;

    fn confirmation_with_recipient(recipient: &str) -> SubjectConfirmation {
        SubjectConfirmation::bearer()
            .with_data(SubjectConfirmationData::default().with_recipient(recipient))
    }

    #[test]
    fn matching_recipient_is_valid() {
        let validator =
            SubjectConfirmationRecipientMatches::new(Destination::new("theSameDestination"));
        let mut result = ValidationResult::new();

        validator.validate(&confirmation_with_recipient("theSameDestination"), &mut result);

        assert!(result.is_valid());
    }

    #[test]
    fn differing_recipient_is_not_valid() {
        let validator =
            SubjectConfirmationRecipientMatches::new(Destination::new("anotherDestination"));
        let mut result = ValidationResult::new();

        validator.validate(&confirmation_with_recipient("someDestination"), &mut result);

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("someDestination"));
        assert!(result.errors()[0].contains("anotherDestination"));
    }

    #[test]
    fn absent_recipient_is_no_constraint() {
        let validator = SubjectConfirmationRecipientMatches::new(Destination::new("anywhere"));
        let mut result = ValidationResult::new();

        validator.validate(&SubjectConfirmation::bearer(), &mut result);

        assert!(result.is_valid());
    }

    fn confirmation_in_response_to(request_id: &str) -> SubjectConfirmation {
        SubjectConfirmation::bearer().with_data(SubjectConfirmationData {
            in_response_to: Some(request_id.to_string()),
            ..SubjectConfirmationData::default()
        })
    }

    #[test]
    fn matching_in_response_to_is_valid() {
        let validator = SubjectConfirmationResponseToMatches::new("_request1");
        let mut result = ValidationResult::new();

        validator.validate(&confirmation_in_response_to("_request1"), &mut result);

        assert!(result.is_valid());
    }

    #[test]
    fn differing_in_response_to_is_not_valid() {
        let validator = SubjectConfirmationResponseToMatches::new("_request1");
        let mut result = ValidationResult::new();

        validator.validate(&confirmation_in_response_to("_someOtherRequest"), &mut result);

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("_someOtherRequest"));
        assert!(result.errors()[0].contains("_request1"));
    }

    #[test]
    fn absent_in_response_to_is_no_constraint() {
        let validator = SubjectConfirmationResponseToMatches::new("_request1");
        let mut result = ValidationResult::new();

        validator.validate(&SubjectConfirmation::bearer(), &mut result);

        assert!(result.is_valid());
    }
}
