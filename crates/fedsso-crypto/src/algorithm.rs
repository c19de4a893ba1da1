//! Algorithm identifiers and the algorithm blacklist.
//!
//! Algorithms are identified by their XML-DSig / XML-Enc URIs, which is how
//! both party configuration and protocol messages name them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// XML-DSig signature algorithm URIs.
pub mod signature_uris {
    /// RSA-SHA256 signature algorithm.
    pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";

    /// RSA-SHA384 signature algorithm.
    pub const RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";

    /// RSA-SHA512 signature algorithm.
    pub const RSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";

    /// Legacy RSA-SHA1 signature algorithm (not recommended).
    pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
}

/// XML-Enc encryption algorithm URIs.
pub mod encryption_uris {
    /// AES-128 in GCM mode.
    pub const AES128_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes128-gcm";

    /// AES-256 in GCM mode.
    pub const AES256_GCM: &str = "http://www.w3.org/2009/xmlenc11#aes256-gcm";

    /// AES-128 in CBC mode (legacy).
    pub const AES128_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes128-cbc";

    /// AES-256 in CBC mode (legacy).
    pub const AES256_CBC: &str = "http://www.w3.org/2001/04/xmlenc#aes256-cbc";

    /// RSA-OAEP key transport.
    pub const RSA_OAEP: &str = "http://www.w3.org/2009/xmlenc11#rsa-oaep";

    /// RSA-OAEP with MGF1/SHA-1 key transport (legacy).
    pub const RSA_OAEP_MGF1P: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";

    /// RSA PKCS#1 v1.5 key transport (broken, blacklisted by default).
    pub const RSA_1_5: &str = "http://www.w3.org/2001/04/xmlenc#rsa-1_5";
}

/// Signature algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    /// RSA with SHA-256 (the SAML interop baseline).
    #[default]
    RsaSha256,
    /// RSA with SHA-384.
    RsaSha384,
    /// RSA with SHA-512.
    RsaSha512,
}

impl SignatureAlgorithm {
    /// Returns the XML-DSig URI for this signature algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::RsaSha256 => signature_uris::RSA_SHA256,
            Self::RsaSha384 => signature_uris::RSA_SHA384,
            Self::RsaSha512 => signature_uris::RSA_SHA512,
        }
    }

    /// Parses a signature algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            signature_uris::RSA_SHA256 => Some(Self::RsaSha256),
            signature_uris::RSA_SHA384 => Some(Self::RsaSha384),
            signature_uris::RSA_SHA512 => Some(Self::RsaSha512),
            _ => None,
        }
    }
}

/// Encryption algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncryptionAlgorithm {
    /// AES-128-GCM content encryption.
    Aes128Gcm,
    /// AES-256-GCM content encryption.
    #[default]
    Aes256Gcm,
    /// RSA-OAEP key transport.
    RsaOaep,
}

impl EncryptionAlgorithm {
    /// Returns the XML-Enc URI for this encryption algorithm.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Aes128Gcm => encryption_uris::AES128_GCM,
            Self::Aes256Gcm => encryption_uris::AES256_GCM,
            Self::RsaOaep => encryption_uris::RSA_OAEP,
        }
    }

    /// Parses an encryption algorithm from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            encryption_uris::AES128_GCM => Some(Self::Aes128Gcm),
            encryption_uris::AES256_GCM => Some(Self::Aes256Gcm),
            encryption_uris::RSA_OAEP => Some(Self::RsaOaep),
            _ => None,
        }
    }

    /// Returns the AES key length in bytes, if this is a content algorithm.
    #[must_use]
    pub const fn key_len(&self) -> Option<usize> {
        match self {
            Self::Aes128Gcm => Some(16),
            Self::Aes256Gcm => Some(32),
            Self::RsaOaep => None,
        }
    }
}

/// A set of algorithm URIs a party refuses to use.
///
/// Sourced from party configuration; the identity provider's blacklist takes
/// precedence over the service provider's when both are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmBlacklist {
    uris: HashSet<String>,
}

impl AlgorithmBlacklist {
    /// Creates an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recommended baseline: PKCS#1 v1.5 key transport and SHA-1
    /// signatures are refused.
    #[must_use]
    pub fn recommended() -> Self {
        [
            encryption_uris::RSA_1_5,
            signature_uris::RSA_SHA1,
        ]
        .into_iter()
        .collect()
    }

    /// Adds an algorithm URI to the blacklist.
    pub fn insert(&mut self, uri: impl Into<String>) {
        self.uris.insert(uri.into());
    }

    /// Returns true if the given algorithm URI is disallowed.
    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }

    /// Returns true if no algorithm is blacklisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AlgorithmBlacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            uris: iter.into_iter().map(Into::into).collect(),
        }
    }
}
