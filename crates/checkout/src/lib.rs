//! Checkout-session engine for the checkout protocol.
//!
//! The engine validates line-item requests against the catalog, computes
//! exact integer totals, creates sessions through the session store, and
//! owns the incomplete→complete transition:
//! 1. Resolve every requested product in the catalog
//! 2. Check availability
//! 3. Compute the total and persist the session
//!
//! Creation either fully succeeds (one session stored) or fully fails
//! (nothing stored); completion succeeds at most once per session.

pub mod error;
pub mod service;

pub use error::{CheckoutError, Result};
pub use service::{CheckoutService, LineItemRequest};
