use async_trait::async_trait;
use common::SessionId;
use domain::{CheckoutSession, SessionStatus};

use crate::Result;

/// Options for updating a stored session.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Status the stored record must currently have for the update to apply.
    /// If None, the record is replaced unconditionally.
    pub expected_status: Option<SessionStatus>,
}

impl UpdateOptions {
    /// Creates options with no status check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stored record to be in a specific
    /// status. The check and the replacement happen atomically, so two
    /// callers racing on the same transition cannot both succeed.
    pub fn expect_status(status: SessionStatus) -> Self {
        Self {
            expected_status: Some(status),
        }
    }
}

/// Core trait for session store implementations.
///
/// All implementations must be thread-safe (Send + Sync). The store holds
/// the only mutable copy of each session; callers receive clones.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Produces a fresh session identifier.
    ///
    /// The default scheme combines the current unix-millisecond timestamp
    /// with a UUIDv4 random component, making a collision across the store's
    /// lifetime overwhelmingly improbable.
    fn new_session_id(&self) -> SessionId {
        generate_session_id()
    }

    /// Inserts a new session.
    ///
    /// Fails with `IdCollision` if the identifier is already present; a
    /// collision is an internal invariant violation, not a retryable event.
    async fn insert(&self, session: CheckoutSession) -> Result<()>;

    /// Retrieves a session by identifier.
    ///
    /// Returns None if the session doesn't exist.
    async fn get(&self, id: &SessionId) -> Result<Option<CheckoutSession>>;

    /// Replaces the stored record for an existing session.
    ///
    /// Fails with `SessionNotFound` if the identifier is absent. If
    /// `options.expected_status` is set, the replacement only happens when
    /// the stored record is in that status, else `StatusConflict`.
    ///
    /// Returns the stored record after the update.
    async fn update(
        &self,
        session: CheckoutSession,
        options: UpdateOptions,
    ) -> Result<CheckoutSession>;
}

/// Generates a session identifier from the current time and a random
/// component: `cs_<unix_millis>_<32 hex chars>`.
pub fn generate_session_id() -> SessionId {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple();
    SessionId::new(format!("cs_{millis}_{random}"))
}
