//! Checkout session record and its status state machine.

use chrono::{DateTime, Utc};
use common::{ProductId, SessionId};
use serde::{Deserialize, Serialize};

use crate::discovery::Capability;
use crate::money::Money;

/// The status of a checkout session.
///
/// Transitions:
/// ```text
/// incomplete ──[complete_checkout]──────► complete   (terminal)
/// incomplete ──[expiry window elapses]──► expired    (terminal, advisory)
/// ```
///
/// `expired` exists on the wire but no component transitions into it; the
/// expiry timestamp is metadata, not an enforced deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is awaiting completion.
    #[default]
    Incomplete,

    /// Payment has been accepted (terminal state).
    Complete,

    /// The checkout window elapsed before completion (terminal state).
    Expired,
}

impl SessionStatus {
    /// Returns true if the completion transition is allowed from this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, SessionStatus::Incomplete)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Expired)
    }

    /// Returns the status name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Incomplete => "incomplete",
            SessionStatus::Complete => "complete",
            SessionStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated line item stored on a session.
///
/// The title is a snapshot of the catalog item's title at checkout time;
/// later catalog edits do not alter existing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item record.
    pub fn new(product_id: impl Into<ProductId>, title: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            title: title.into(),
            quantity,
        }
    }
}

/// The stateful record of an in-progress or completed order.
///
/// Created by the checkout engine on successful validation and mutated only
/// by the completion transition. The session store is the single source of
/// truth for existence and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: SessionId,
    pub status: SessionStatus,
    pub line_items: Vec<LineItem>,
    pub total: Money,
    pub payment_capabilities: Vec<Capability>,
    pub expires_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Returns true if the advisory expiry timestamp has passed.
    ///
    /// Informational only: no operation rejects an expired-but-incomplete
    /// session.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn default_status_is_incomplete() {
        assert_eq!(SessionStatus::default(), SessionStatus::Incomplete);
    }

    #[test]
    fn only_incomplete_can_complete() {
        assert!(SessionStatus::Incomplete.can_complete());
        assert!(!SessionStatus::Complete.can_complete());
        assert!(!SessionStatus::Expired.can_complete());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!SessionStatus::Incomplete.is_terminal());
        assert!(SessionStatus::Complete.is_terminal());
        assert!(SessionStatus::Expired.is_terminal());
    }

    #[test]
    fn status_wire_names_are_lowercase() {
        assert_eq!(SessionStatus::Incomplete.to_string(), "incomplete");
        assert_eq!(
            serde_json::to_string(&SessionStatus::Complete).unwrap(),
            "\"complete\""
        );
        let status: SessionStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(status, SessionStatus::Expired);
    }

    #[test]
    fn is_expired_compares_against_given_instant() {
        let session = CheckoutSession {
            id: SessionId::new("cs_test"),
            status: SessionStatus::Incomplete,
            line_items: vec![LineItem::new("latte", "Latte", 1)],
            total: Money::new(550, "USD").unwrap(),
            payment_capabilities: vec![],
            expires_at: Utc::now(),
        };

        assert!(session.is_expired(session.expires_at + Duration::seconds(1)));
        assert!(!session.is_expired(session.expires_at - Duration::seconds(1)));
    }

    #[test]
    fn session_serialization_roundtrip() {
        let session = CheckoutSession {
            id: SessionId::new("cs_test"),
            status: SessionStatus::Incomplete,
            line_items: vec![LineItem::new("latte", "Latte", 2)],
            total: Money::new(1100, "USD").unwrap(),
            payment_capabilities: vec![Capability::new("payment.mark_complete", "1.0")],
            expires_at: Utc::now(),
        };

        let json = serde_json::to_string(&session).unwrap();
        let deserialized: CheckoutSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, deserialized);
    }
}
