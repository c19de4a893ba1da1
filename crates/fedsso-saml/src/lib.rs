//! SAML 2.0 assertion consumer for fedsso.
//!
//! This crate implements the trust-decision core of the service-provider
//! side of a federated SSO exchange:
//!
//! - **Constraint validation** - independent checks for freshness,
//!   audience, destination, recipient, and request correlation, merged
//!   into one [`validation::ValidationResult`]
//! - **Signature trial** - verification of signed elements against every
//!   configured candidate key of a party
//! - **NameID decryption** - a multi-key decryption trial for encrypted
//!   subject identifiers
//! - **Metadata** - the entity descriptor model and a priority-ordered
//!   source registry
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`types`] - the SAML object model consumed by the engine
//! - [`validation`] - the constraint-validation engine
//! - [`signature`] - signature verification against candidate keys
//! - [`transformer`] - assertion transformers (NameID decryption)
//! - [`certificate`] - certificates, loaded keys, and the candidate store
//! - [`metadata`] - entity descriptors and the metadata registry
//! - [`error`] - error types for consumer operations
//!
//! XML parsing/serialization, HTTP bindings, and certificate-chain trust
//! are outside this crate: messages arrive already parsed and
//! canonicalized, and certificates are trusted as configured.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod certificate;
pub mod error;
pub mod metadata;
pub mod signature;
pub mod transformer;
pub mod types;
pub mod validation;

pub use error::{SamlError, SamlResult};
pub use types::*;
