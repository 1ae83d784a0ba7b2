//! Session store for the checkout protocol.
//!
//! The store is the single source of truth for session existence and status.
//! It owns identifier generation and exposes a compare-and-swap update so the
//! completion transition stays atomic under parallel callers.

pub mod error;
pub mod memory;
pub mod store;

pub use common::SessionId;
pub use error::{Result, SessionStoreError};
pub use memory::InMemorySessionStore;
pub use store::{SessionStore, UpdateOptions, generate_session_id};
