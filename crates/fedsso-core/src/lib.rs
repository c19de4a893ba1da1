//! # fedsso-core
//!
//! Foundational types for the fedsso assertion consumer: the overridable
//! temporal source used by every time-dependent check, and the
//! configuration model describing the two parties of a federated exchange.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod temporal;

pub use config::{
    Destination, IdentityProviderConfig, KeyName, KeySource, PrivateKeyConfig,
    ServiceProviderConfig,
};
pub use temporal::{Clock, FixedClock, SystemClock};
