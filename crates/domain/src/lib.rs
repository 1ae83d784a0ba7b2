//! Domain layer for the checkout protocol.
//!
//! This crate provides the pure domain types with no I/O:
//! - Catalog of sellable items with lookup and availability filtering
//! - Exact integer money arithmetic and total computation
//! - Checkout session record with its status state machine
//! - Discovery descriptor describing the service to clients

pub mod catalog;
pub mod discovery;
pub mod money;
pub mod session;

pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use discovery::{Capability, DiscoveryDescriptor, PROTOCOL_VERSION};
pub use money::{CurrencyCode, Money, MoneyError, compute_total};
pub use session::{CheckoutSession, LineItem, SessionStatus};
