use common::SessionId;
use domain::SessionStatus;
use thiserror::Error;

/// Errors that can occur when interacting with the session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// A freshly generated identifier already exists in the store.
    /// Indicates a defect in the generation scheme, never retried.
    #[error("session id collision: {0}")]
    IdCollision(SessionId),

    /// The session was not found in the store.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The stored status did not match the expected status on update.
    #[error("status conflict for session {id}: expected {expected}, found {actual}")]
    StatusConflict {
        id: SessionId,
        expected: SessionStatus,
        actual: SessionStatus,
    },
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, SessionStoreError>;
