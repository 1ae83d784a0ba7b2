use serde::{Deserialize, Serialize};

/// Product identifier (catalog key).
///
/// Wraps the catalog's opaque string identifier to provide type safety and
/// prevent mixing up product ids with other string-based identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checkout session identifier.
///
/// An opaque string assigned by the session store. Callers must not parse or
/// derive meaning from its structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_string_conversion() {
        let id = ProductId::new("latte");
        assert_eq!(id.as_str(), "latte");

        let id2: ProductId = "espresso".into();
        assert_eq!(id2.as_str(), "espresso");
    }

    #[test]
    fn product_id_display() {
        let id = ProductId::new("latte");
        assert_eq!(id.to_string(), "latte");
    }

    #[test]
    fn session_id_preserves_value() {
        let id = SessionId::new("cs_123_abc");
        assert_eq!(id.as_str(), "cs_123_abc");
        assert_eq!(id.to_string(), "cs_123_abc");
    }

    #[test]
    fn session_id_serialization_roundtrip() {
        let id = SessionId::new("cs_123_abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cs_123_abc\"");
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
