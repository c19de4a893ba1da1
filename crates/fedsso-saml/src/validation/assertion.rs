//! Assertion-level constraint validators.

use std::sync::Arc;

use chrono::Duration;

use fedsso_core::temporal::Clock;

use crate::types::Assertion;

use super::{AssertionConstraintValidator, ValidationResult, CLOCK_SKEW_SECONDS};

/// Rejects assertions whose `NotOnOrAfter` lies beyond the skew grace
/// period in the past.
///
/// The boundary is inclusive on the valid side: a value exactly
/// `CLOCK_SKEW_SECONDS` old still passes, one second older does not. An
/// absent value is no constraint.
pub struct NotOnOrAfter {
    clock: Arc<dyn Clock>,
}

impl NotOnOrAfter {
    /// Creates the validator with the given time source.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl AssertionConstraintValidator for NotOnOrAfter {
    fn validate(&self, assertion: &Assertion, result: &mut ValidationResult) {
        if let Some(not_on_or_after) = assertion.not_on_or_after() {
            let oldest_accepted = self.clock.now() - Duration::seconds(CLOCK_SKEW_SECONDS);
            if not_on_or_after < oldest_accepted {
                result.add_error(
                    "Received an assertion that has expired. \
                     Check clock synchronization on IdP and SP.",
                );
            }
        }
    }
}

/// Rejects assertions whose session expiry lies beyond the skew grace
/// period in the past. Same boundary law as [`NotOnOrAfter`].
pub struct SessionNotOnOrAfter {
    clock: Arc<dyn Clock>,
}

impl SessionNotOnOrAfter {
    /// Creates the validator with the given time source.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl AssertionConstraintValidator for SessionNotOnOrAfter {
    fn validate(&self, assertion: &Assertion, result: &mut ValidationResult) {
        if let Some(session_not_on_or_after) = assertion.session_not_on_or_after() {
            let oldest_accepted = self.clock.now() - Duration::seconds(CLOCK_SKEW_SECONDS);
            if session_not_on_or_after < oldest_accepted {
                result.add_error(
                    "Received an assertion with a session that has expired. \
                     Check clock synchronization on IdP and SP.",
                );
            }
        }
    }
}

/// Rejects assertions that only become valid more than the skew grace
/// period in the future.
pub struct NotBefore {
    clock: Arc<dyn Clock>,
}

impl NotBefore {
    /// Creates the validator with the given time source.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl AssertionConstraintValidator for NotBefore {
    fn validate(&self, assertion: &Assertion, result: &mut ValidationResult) {
        if let Some(not_before) = assertion.not_before() {
            let newest_accepted = self.clock.now() + Duration::seconds(CLOCK_SKEW_SECONDS);
            if not_before > newest_accepted {
                result.add_error(
                    "Received an assertion that is valid in the future. \
                     Check clock synchronization on IdP and SP.",
                );
            }
        }
    }
}

/// Rejects assertions whose audience restrictions do not name this service
/// provider. An assertion without audience restrictions is unrestricted.
pub struct SpIsValidAudience {
    entity_id: String,
}

impl SpIsValidAudience {
    /// Creates the validator for the given service-provider entity ID.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }
}

impl AssertionConstraintValidator for SpIsValidAudience {
    fn validate(&self, assertion: &Assertion, result: &mut ValidationResult) {
        let audiences = assertion.audiences();
        if audiences.is_empty() {
            return;
        }
        if !audiences.iter().any(|a| *a == self.entity_id) {
            result.add_error(format!(
                "The configured Service Provider \"{}\" is not a valid audience for the \
                 assertion. Audiences: \"{}\"",
                self.entity_id,
                audiences.join("\", \""),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthnStatement, Conditions};
    use chrono::{DateTime, TimeZone, Utc};
    use fedsso_core::temporal::FixedClock;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(now()))
    }

    fn assertion_expiring_at(instant: DateTime<Utc>) -> Assertion {
        Assertion::new("https://idp.example.org")
            .with_conditions(Conditions::new().with_not_on_or_after(instant))
    }

    #[test]
    fn timestamp_at_grace_boundary_is_valid() {
        let validator = NotOnOrAfter::new(clock());
        let mut result = ValidationResult::new();

        validator.validate(
            &assertion_expiring_at(now() - Duration::seconds(60)),
            &mut result,
        );

        assert!(result.is_valid());
    }

    #[test]
    fn timestamp_past_grace_boundary_is_not_valid() {
        let validator = NotOnOrAfter::new(clock());
        let mut result = ValidationResult::new();

        validator.validate(
            &assertion_expiring_at(now() - Duration::seconds(61)),
            &mut result,
        );

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("expired"));
    }

    #[test]
    fn current_and_future_timestamps_are_valid() {
        let validator = NotOnOrAfter::new(clock());

        for instant in [now(), now() + Duration::seconds(3600)] {
            let mut result = ValidationResult::new();
            validator.validate(&assertion_expiring_at(instant), &mut result);
            assert!(result.is_valid());
        }
    }

    #[test]
    fn absent_expiry_is_no_constraint() {
        let validator = NotOnOrAfter::new(clock());
        let mut result = ValidationResult::new();

        validator.validate(&Assertion::new("https://idp.example.org"), &mut result);

        assert!(result.is_valid());
    }

    fn assertion_with_session_expiry(instant: DateTime<Utc>) -> Assertion {
        Assertion::new("https://idp.example.org")
            .with_authn_statement(AuthnStatement::new().with_session_not_on_or_after(instant))
    }

    #[test]
    fn session_expiry_at_grace_boundary_is_valid() {
        let validator = SessionNotOnOrAfter::new(clock());
        let mut result = ValidationResult::new();

        validator.validate(
            &assertion_with_session_expiry(now() - Duration::seconds(60)),
            &mut result,
        );

        assert!(result.is_valid());
    }

    #[test]
    fn session_expiry_past_grace_boundary_is_not_valid() {
        let validator = SessionNotOnOrAfter::new(clock());
        let mut result = ValidationResult::new();

        validator.validate(
            &assertion_with_session_expiry(now() - Duration::seconds(61)),
            &mut result,
        );

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("session"));
    }

    #[test]
    fn not_before_within_grace_is_valid() {
        let validator = NotBefore::new(clock());
        let assertion = Assertion::new("https://idp.example.org").with_conditions(
            Conditions::new().with_not_before(now() + Duration::seconds(60)),
        );
        let mut result = ValidationResult::new();

        validator.validate(&assertion, &mut result);

        assert!(result.is_valid());
    }

    #[test]
    fn not_before_too_far_in_the_future_is_not_valid() {
        let validator = NotBefore::new(clock());
        let assertion = Assertion::new("https://idp.example.org").with_conditions(
            Conditions::new().with_not_before(now() + Duration::seconds(61)),
        );
        let mut result = ValidationResult::new();

        validator.validate(&assertion, &mut result);

        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("future"));
    }

    #[test]
    fn matching_audience_is_valid() {
        let validator = SpIsValidAudience::new("https://sp.example.org");
        let assertion = Assertion::new("https://idp.example.org")
            .with_conditions(Conditions::new().with_audience("https://sp.example.org"));
        let mut result = ValidationResult::new();

        validator.validate(&assertion, &mut result);

        assert!(result.is_valid());
    }

    #[test]
    fn foreign_audience_is_not_valid() {
        let validator = SpIsValidAudience::new("https://sp.example.org");
        let assertion = Assertion::new("https://idp.example.org")
            .with_conditions(Conditions::new().with_audience("https://other.example.org"));
        let mut result = ValidationResult::new();

        validator.validate(&assertion, &mut result);

        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("https://sp.example.org"));
        assert!(result.errors()[0].contains("https://other.example.org"));
    }

    #[test]
    fn unrestricted_assertion_is_valid_for_any_audience() {
        let validator = SpIsValidAudience::new("https://sp.example.org");
        let mut result = ValidationResult::new();

        validator.validate(&Assertion::new("https://idp.example.org"), &mut result);

        assert!(result.is_valid());
    }

    #[test]
    fn validators_are_idempotent() {
        let validator = NotOnOrAfter::new(clock());
        let assertion = assertion_expiring_at(now() - Duration::seconds(120));

        let mut first = ValidationResult::new();
        let mut second = ValidationResult::new();
        validator.validate(&assertion, &mut first);
        validator.validate(&assertion, &mut second);

        assert_eq!(first.errors(), second.errors());
    }
}
