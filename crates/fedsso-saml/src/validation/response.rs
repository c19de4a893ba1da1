//! Response-level constraint validators.

use fedsso_core::config::Destination;

use crate::types::Response;

use super::{ResponseConstraintValidator, ValidationResult};

/// Checks that the response's declared destination names this endpoint
/// exactly.
pub struct DestinationMatches {
    expected: Destination,
}

impl DestinationMatches {
    /// Creates the validator with the expected destination.
    #[must_use]
    pub fn new(expected: Destination) -> Self {
        Self { expected }
    }
}

impl ResponseConstraintValidator for DestinationMatches {
    fn validate(&self, response: &Response, result: &mut ValidationResult) {
        match response.destination() {
            None => result.add_error("no destination set in the response"),
            Some(destination) if !self.expected.matches(destination) => {
                result.add_error(format!(
                    "Destination in response \"{destination}\" does not match the expected \
                     destination \"{}\"",
                    self.expected
                ));
            }
            Some(_) => {}
        }
    }
}
