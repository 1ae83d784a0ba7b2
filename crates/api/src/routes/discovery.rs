//! Discovery document endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::DiscoveryDescriptor;
use session_store::SessionStore;

use super::checkout_sessions::AppState;

/// GET /.well-known/discovery.json — returns the store's capability
/// document.
#[tracing::instrument(skip(state))]
pub async fn get<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<DiscoveryDescriptor> {
    Json(state.descriptor.clone())
}
