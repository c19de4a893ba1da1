//! # fedsso-crypto
//!
//! Cryptographic operations for the fedsso assertion consumer, built on
//! aws-lc-rs.
//!
//! SAML 2.0 interoperability pins the signature floor at RSA-SHA256, so this
//! crate deliberately supports SHA-256 based algorithms alongside the
//! stronger SHA-384/SHA-512 variants. Key transport uses RSA-OAEP; content
//! decryption uses AES-GCM.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithm;
pub mod encryption;
pub mod hash;
pub mod pem;
pub mod signature;

pub use algorithm::{AlgorithmBlacklist, EncryptionAlgorithm, SignatureAlgorithm};
pub use encryption::{DecryptionKey, EncryptionError, EncryptionKey};
pub use hash::{sha256, sha384, sha512};
pub use signature::{rsa_sign, rsa_verify, SignatureError};
