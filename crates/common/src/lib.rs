//! Shared identifier types used across the checkout protocol crates.

pub mod types;

pub use types::{ProductId, SessionId};
