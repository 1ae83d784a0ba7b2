//! Checkout-session lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use checkout::{CheckoutService, LineItemRequest};
use common::SessionId;
use domain::{Capability, Catalog, CheckoutSession, DiscoveryDescriptor, Money};
use serde::{Deserialize, Serialize};
use session_store::SessionStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SessionStore> {
    pub checkout: CheckoutService<S>,
    pub catalog: Arc<Catalog>,
    pub descriptor: DiscoveryDescriptor,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateCheckoutRequest {
    pub line_items: Vec<LineItemRequest>,
}

// -- Response types --

#[derive(Serialize)]
pub struct LineItemResponse {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub status: String,
    pub line_items: Vec<LineItemResponse>,
    pub total: Money,
    pub payment_capabilities: Vec<Capability>,
    pub expires_at: String,
}

impl SessionResponse {
    fn from_session(session: CheckoutSession) -> Self {
        Self {
            id: session.id.to_string(),
            status: session.status.as_str().to_string(),
            line_items: session
                .line_items
                .into_iter()
                .map(|item| LineItemResponse {
                    product_id: item.product_id.to_string(),
                    title: item.title,
                    quantity: item.quantity,
                })
                .collect(),
            total: session.total,
            payment_capabilities: session.payment_capabilities,
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /checkout_sessions — create a session from line-item requests.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateCheckoutRequest>,
) -> Result<(axum::http::StatusCode, Json<SessionResponse>), ApiError> {
    let session = state.checkout.create_checkout(req.line_items).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(SessionResponse::from_session(session)),
    ))
}

/// GET /checkout_sessions/:id — load a session by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.checkout.get_checkout(&SessionId::new(id)).await?;
    Ok(Json(SessionResponse::from_session(session)))
}

/// POST /checkout_sessions/:id/complete — mark a session paid.
#[tracing::instrument(skip(state))]
pub async fn complete<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .checkout
        .complete_checkout(&SessionId::new(id))
        .await?;
    Ok(Json(SessionResponse::from_session(session)))
}
