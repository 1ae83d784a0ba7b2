//! Discovery descriptor: the static capability document a client reads once
//! to learn how to talk to the store.

use serde::{Deserialize, Serialize};

/// Protocol version advertised in the discovery document.
pub const PROTOCOL_VERSION: &str = "1.0";

/// A named, versioned feature the store declares support for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    pub version: String,
}

impl Capability {
    /// Creates a capability pair.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The store's self-description. No mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDescriptor {
    pub protocol_version: String,
    pub service_endpoint: String,
    pub capabilities: Vec<Capability>,
}

impl DiscoveryDescriptor {
    /// Builds the descriptor for a service endpoint with the default
    /// capability set.
    pub fn new(service_endpoint: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            service_endpoint: service_endpoint.into(),
            capabilities: default_capabilities(),
        }
    }
}

/// The full capability list advertised by this reference store.
pub fn default_capabilities() -> Vec<Capability> {
    vec![
        Capability::new("catalog", "1.0"),
        Capability::new("checkout_sessions", "1.0"),
        Capability::new("payment.mark_complete", "1.0"),
    ]
}

/// The payment capabilities attached to each checkout session.
pub fn payment_capabilities() -> Vec<Capability> {
    vec![Capability::new("payment.mark_complete", "1.0")]
}
