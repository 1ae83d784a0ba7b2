//! Route handlers, one module per resource.

pub mod checkout_sessions;
pub mod discovery;
pub mod health;
pub mod metrics;
pub mod products;
