//! The constraint-validation engine.
//!
//! Each constraint validator is a stateless, single-purpose check that
//! inspects one aspect of a message and appends violations to a shared
//! [`ValidationResult`]. A failed business check is an appended error,
//! never an `Err`; the validators are independent and may run in any
//! order without changing the final error set.

mod assertion;
mod response;
mod result;
mod subject_confirmation;

pub use assertion::{NotBefore, NotOnOrAfter, SessionNotOnOrAfter, SpIsValidAudience};
pub use response::DestinationMatches;
pub use result::ValidationResult;
pub use subject_confirmation::{
    SubjectConfirmationRecipientMatches, SubjectConfirmationResponseToMatches,
};

use crate::types::{Assertion, Response, SubjectConfirmation};

/// Clock-skew grace period applied to every time-window check, in seconds.
///
/// A timestamp up to this far on the wrong side of "now" is still accepted,
/// tolerating modest clock drift between the identity provider and this
/// service provider.
pub const CLOCK_SKEW_SECONDS: i64 = 60;

/// A single constraint check against an assertion.
pub trait AssertionConstraintValidator {
    /// Examines the assertion and appends any violations to `result`.
    fn validate(&self, assertion: &Assertion, result: &mut ValidationResult);
}

/// A single constraint check against a response message.
pub trait ResponseConstraintValidator {
    /// Examines the response and appends any violations to `result`.
    fn validate(&self, response: &Response, result: &mut ValidationResult);
}

/// A single constraint check against a subject confirmation.
pub trait SubjectConfirmationConstraintValidator {
    /// Examines the subject confirmation and appends any violations to
    /// `result`.
    fn validate(&self, confirmation: &SubjectConfirmation, result: &mut ValidationResult);
}

/// Runs a set of assertion constraint validators and merges their errors.
#[derive(Default)]
pub struct AssertionValidator {
    validators: Vec<Box<dyn AssertionConstraintValidator>>,
}

impl AssertionValidator {
    /// Creates an empty validator set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constraint validator.
    pub fn add(&mut self, validator: Box<dyn AssertionConstraintValidator>) {
        self.validators.push(validator);
    }

    /// Runs every registered validator against the assertion.
    #[must_use]
    pub fn validate(&self, assertion: &Assertion) -> ValidationResult {
        let mut result = ValidationResult::new();
        for validator in &self.validators {
            validator.validate(assertion, &mut result);
        }
        result
    }
}

/// Runs a set of response constraint validators and merges their errors.
#[derive(Default)]
pub struct ResponseValidator {
    validators: Vec<Box<dyn ResponseConstraintValidator>>,
}

impl ResponseValidator {
    /// Creates an empty validator set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constraint validator.
    pub fn add(&mut self, validator: Box<dyn ResponseConstraintValidator>) {
        self.validators.push(validator);
    }

    /// Runs every registered validator against the response.
    #[must_use]
    pub fn validate(&self, response: &Response) -> ValidationResult {
        let mut result = ValidationResult::new();
        for validator in &self.validators {
            validator.validate(response, &mut result);
        }
        result
    }
}

/// Runs a set of subject-confirmation validators and merges their errors.
#[derive(Default)]
pub struct SubjectConfirmationValidator {
    validators: Vec<Box<dyn SubjectConfirmationConstraintValidator>>,
}

impl SubjectConfirmationValidator {
    /// Creates an empty validator set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constraint validator.
    pub fn add(&mut self, validator: Box<dyn SubjectConfirmationConstraintValidator>) {
        self.validators.push(validator);
    }

    /// Runs every registered validator against the subject confirmation.
    #[must_use]
    pub fn validate(&self, confirmation: &SubjectConfirmation) -> ValidationResult {
        let mut result = ValidationResult::new();
        for validator in &self.validators {
            validator.validate(confirmation, &mut result);
        }
        result
    }
}
