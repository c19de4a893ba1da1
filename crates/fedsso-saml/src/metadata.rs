//! Metadata object model and the source registry.
//!
//! Schema variants share field sets by composition: both role descriptors
//! embed the common [`SsoDescriptor`] block instead of inheriting from it.
//! Metadata sources are queried through an explicitly constructed
//! [`MetadataRegistry`] handed to consumers by reference; there is no
//! process-wide handler.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use fedsso_core::config::IdentityProviderConfig;

/// How a published key may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUse {
    /// Usable for signature verification only.
    Signing,
    /// Usable for encryption only.
    Encryption,
    /// Usable for both.
    #[default]
    Any,
}

/// A key published in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Intended use of this key.
    #[serde(default)]
    pub key_use: KeyUse,

    /// PEM certificate carrying the key.
    pub certificate: String,
}

impl KeyDescriptor {
    /// Creates a signing key descriptor.
    #[must_use]
    pub fn signing(certificate: impl Into<String>) -> Self {
        Self {
            key_use: KeyUse::Signing,
            certificate: certificate.into(),
        }
    }

    /// Creates an encryption key descriptor.
    #[must_use]
    pub fn encryption(certificate: impl Into<String>) -> Self {
        Self {
            key_use: KeyUse::Encryption,
            certificate: certificate.into(),
        }
    }

    /// Returns true if this key may verify signatures.
    #[must_use]
    pub const fn supports_signing(&self) -> bool {
        matches!(self.key_use, KeyUse::Signing | KeyUse::Any)
    }
}

/// A protocol endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Binding URI of this endpoint.
    pub binding: String,

    /// Location URL.
    pub location: String,

    /// Optional distinct response location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_location: Option<String>,
}

/// An indexed endpoint (assertion consumer service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedEndpoint {
    /// The endpoint itself.
    #[serde(flatten)]
    pub endpoint: Endpoint,

    /// Index of this endpoint.
    pub index: u16,

    /// Whether this endpoint is the default choice.
    #[serde(default)]
    pub is_default: bool,
}

/// Field set shared by both SSO role descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoDescriptor {
    /// Keys published for this role.
    #[serde(default)]
    pub key_descriptors: Vec<KeyDescriptor>,

    /// Supported NameID format URIs.
    #[serde(default)]
    pub name_id_formats: Vec<String>,

    /// Single-logout endpoints.
    #[serde(default)]
    pub single_logout_services: Vec<Endpoint>,
}

/// The identity-provider role of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpSsoDescriptor {
    /// Fields shared with the SP role.
    #[serde(flatten)]
    pub common: SsoDescriptor,

    /// Single-sign-on endpoints.
    #[serde(default)]
    pub single_sign_on_services: Vec<Endpoint>,

    /// Whether authentication requests to this IdP must be signed.
    #[serde(default)]
    pub want_authn_requests_signed: bool,
}

/// The service-provider role of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpSsoDescriptor {
    /// Fields shared with the IdP role.
    #[serde(flatten)]
    pub common: SsoDescriptor,

    /// Assertion consumer endpoints.
    #[serde(default)]
    pub assertion_consumer_services: Vec<IndexedEndpoint>,

    /// Whether this SP signs its authentication requests.
    #[serde(default)]
    pub authn_requests_signed: bool,

    /// Whether this SP requires signed assertions.
    #[serde(default)]
    pub want_assertions_signed: bool,
}

/// Organization behind an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization name.
    pub name: String,

    /// Human-readable display name.
    pub display_name: String,

    /// Organization URL.
    pub url: String,
}

/// A contact person for an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    /// Contact type (technical, support, administrative, ...).
    pub contact_type: String,

    /// Email addresses.
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

/// Metadata describing one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Entity ID.
    pub entity_id: String,

    /// Identity-provider role, if the entity acts as one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_sso_descriptor: Option<IdpSsoDescriptor>,

    /// Service-provider role, if the entity acts as one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp_sso_descriptor: Option<SpSsoDescriptor>,

    /// Organization behind the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    /// Contact persons.
    #[serde(default)]
    pub contact_persons: Vec<ContactPerson>,
}

impl EntityDescriptor {
    /// Creates an entity descriptor with the given entity ID.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    /// Sets the identity-provider role.
    #[must_use]
    pub fn with_idp_descriptor(mut self, descriptor: IdpSsoDescriptor) -> Self {
        self.idp_sso_descriptor = Some(descriptor);
        self
    }

    /// Sets the service-provider role.
    #[must_use]
    pub fn with_sp_descriptor(mut self, descriptor: SpSsoDescriptor) -> Self {
        self.sp_sso_descriptor = Some(descriptor);
        self
    }

    /// Builds the trust configuration for this entity's IdP role: every
    /// signing-capable published certificate becomes a verification
    /// candidate, in publication order.
    #[must_use]
    pub fn to_identity_provider_config(&self) -> IdentityProviderConfig {
        let mut config = IdentityProviderConfig::new(self.entity_id.clone());
        if let Some(idp) = &self.idp_sso_descriptor {
            for key_descriptor in &idp.common.key_descriptors {
                if key_descriptor.supports_signing() {
                    config = config.with_certificate(key_descriptor.certificate.clone());
                }
            }
        }
        config
    }
}

/// A provider of entity metadata.
pub trait MetadataSource {
    /// Returns the metadata for an entity, if this source knows it.
    fn entity_descriptor(&self, entity_id: &str) -> Option<EntityDescriptor>;
}

/// Metadata held in memory, keyed by entity ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataSource {
    entities: HashMap<String, EntityDescriptor>,
}

impl InMemoryMetadataSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to this source.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.insert(entity.entity_id.clone(), entity);
        self
    }
}

impl MetadataSource for InMemoryMetadataSource {
    fn entity_descriptor(&self, entity_id: &str) -> Option<EntityDescriptor> {
        self.entities.get(entity_id).cloned()
    }
}

/// An ordered chain of metadata sources.
///
/// Sources are queried front to back and the first hit wins; registration
/// order is precedence order. The registry is constructed once and passed
/// by reference to whoever needs metadata.
#[derive(Default)]
pub struct MetadataRegistry {
    sources: Vec<Box<dyn MetadataSource>>,
}

impl MetadataRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source at the end of the priority order.
    pub fn add_source(&mut self, source: Box<dyn MetadataSource>) {
        self.sources.push(source);
    }

    /// Looks an entity up across all sources in priority order.
    #[must_use]
    pub fn entity_descriptor(&self, entity_id: &str) -> Option<EntityDescriptor> {
        self.sources
            .iter()
            .find_map(|source| source.entity_descriptor(entity_id))
    }
}
