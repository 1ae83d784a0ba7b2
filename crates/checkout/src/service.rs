//! Checkout service: the engine behind the five protocol operations.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{ProductId, SessionId};
use domain::{
    Capability, Catalog, CatalogItem, CheckoutSession, LineItem, SessionStatus, compute_total,
    discovery,
};
use serde::{Deserialize, Serialize};
use session_store::{SessionStore, SessionStoreError, UpdateOptions};

use crate::error::{CheckoutError, Result};

/// How long a fresh session stays completable, as advisory metadata.
const CHECKOUT_WINDOW_MINUTES: i64 = 30;

/// A requested (product, quantity) pairing.
///
/// Exists only for the duration of a checkout-creation call. Quantity
/// positivity is enforced by the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

impl LineItemRequest {
    /// Creates a line-item request.
    pub fn new(product_id: impl Into<ProductId>, quantity: NonZeroU32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Service implementing the checkout-session lifecycle.
///
/// Holds the catalog and the session store explicitly so tests can construct
/// isolated instances per case; there is no process-wide state.
pub struct CheckoutService<S: SessionStore> {
    catalog: Arc<Catalog>,
    store: S,
    payment_capabilities: Vec<Capability>,
    checkout_window: Duration,
}

impl<S: SessionStore> CheckoutService<S> {
    /// Creates a checkout service over a catalog and session store.
    pub fn new(catalog: Arc<Catalog>, store: S) -> Self {
        Self {
            catalog,
            store,
            payment_capabilities: discovery::payment_capabilities(),
            checkout_window: Duration::minutes(CHECKOUT_WINDOW_MINUTES),
        }
    }

    /// Overrides the advisory checkout window.
    pub fn with_checkout_window(mut self, window: Duration) -> Self {
        self.checkout_window = window;
        self
    }

    /// Returns the catalog this service validates against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Creates a checkout session from line-item requests.
    ///
    /// Validation runs in order and the first failure wins: a non-empty
    /// request, every id resolving in the catalog, every resolved item
    /// available. On any failure nothing is stored.
    #[tracing::instrument(skip(self, requests))]
    pub async fn create_checkout(
        &self,
        requests: Vec<LineItemRequest>,
    ) -> Result<CheckoutSession> {
        metrics::counter!("checkout_create_requests_total").increment(1);

        if requests.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut resolved: Vec<&CatalogItem> = Vec::with_capacity(requests.len());
        for request in &requests {
            let item = self
                .catalog
                .lookup(&request.product_id)
                .ok_or_else(|| CheckoutError::ProductNotFound(request.product_id.clone()))?;
            resolved.push(item);
        }

        for item in &resolved {
            if !item.available {
                return Err(CheckoutError::OutOfStock(item.id.clone()));
            }
        }

        let lines = resolved
            .iter()
            .zip(&requests)
            .map(|(item, request)| (*item, request.quantity.get()));
        let total = compute_total(lines)?;

        let line_items = resolved
            .iter()
            .zip(&requests)
            .map(|(item, request)| {
                LineItem::new(item.id.clone(), item.title.clone(), request.quantity.get())
            })
            .collect();

        let session = CheckoutSession {
            id: self.store.new_session_id(),
            status: SessionStatus::Incomplete,
            line_items,
            total,
            payment_capabilities: self.payment_capabilities.clone(),
            expires_at: Utc::now() + self.checkout_window,
        };

        self.store.insert(session.clone()).await?;

        metrics::counter!("checkout_sessions_created").increment(1);
        tracing::info!(session_id = %session.id, total = %session.total, "checkout session created");

        Ok(session)
    }

    /// Loads a session by identifier.
    #[tracing::instrument(skip(self))]
    pub async fn get_checkout(&self, id: &SessionId) -> Result<CheckoutSession> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| CheckoutError::SessionNotFound(id.clone()))
    }

    /// Transitions a session from incomplete to complete.
    ///
    /// The status check and the write are one atomic compare-and-swap in the
    /// store, so two racing calls yield exactly one success. A session that
    /// is no longer completable is rejected with `AlreadyComplete`.
    #[tracing::instrument(skip(self))]
    pub async fn complete_checkout(&self, id: &SessionId) -> Result<CheckoutSession> {
        let mut session = self.get_checkout(id).await?;

        if !session.status.can_complete() {
            return Err(CheckoutError::AlreadyComplete(id.clone()));
        }

        session.status = SessionStatus::Complete;
        let updated = self
            .store
            .update(session, UpdateOptions::expect_status(SessionStatus::Incomplete))
            .await
            .map_err(|e| match e {
                SessionStoreError::StatusConflict { .. } => {
                    CheckoutError::AlreadyComplete(id.clone())
                }
                SessionStoreError::SessionNotFound(id) => CheckoutError::SessionNotFound(id),
                other => CheckoutError::Store(other),
            })?;

        metrics::counter!("checkout_sessions_completed").increment(1);
        tracing::info!(session_id = %updated.id, "checkout session completed");

        Ok(updated)
    }
}
