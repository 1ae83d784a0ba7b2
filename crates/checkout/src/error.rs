//! Checkout engine error types.

use common::{ProductId, SessionId};
use domain::MoneyError;
use session_store::SessionStoreError;
use thiserror::Error;

/// Errors that can occur during checkout operations.
///
/// `EmptyCart`, `ProductNotFound`, and `OutOfStock` are client-input errors;
/// `SessionNotFound` and `AlreadyComplete` are state conflicts. Both carry
/// the offending identifier so callers can self-correct. `Money` and `Store`
/// wrap internal invariant violations that abort the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The line-item request sequence was empty.
    #[error("cart is empty")]
    EmptyCart,

    /// A requested product id did not resolve in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A requested product is not currently available.
    #[error("product out of stock: {0}")]
    OutOfStock(ProductId),

    /// The session was not found in the store.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session has already been completed. Completion models an
    /// irreversible payment capture, so a second call is rejected rather
    /// than absorbed.
    #[error("session already completed: {0}")]
    AlreadyComplete(SessionId),

    /// Money computation error.
    #[error("money computation error: {0}")]
    Money(#[from] MoneyError),

    /// Session store error.
    #[error("session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Result type for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;
