//! Product catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::CatalogItem;
use serde::Serialize;
use session_store::SessionStore;

use super::checkout_sessions::AppState;

#[derive(Serialize)]
pub struct ProductsResponse {
    pub products: Vec<CatalogItem>,
    pub count: usize,
}

/// GET /products — lists available catalog items in catalog order.
#[tracing::instrument(skip(state))]
pub async fn list<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<ProductsResponse> {
    let products: Vec<CatalogItem> = state.catalog.available().cloned().collect();
    let count = products.len();

    Json(ProductsResponse { products, count })
}
