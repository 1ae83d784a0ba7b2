//! HTTP server for the checkout protocol.
//!
//! Exposes the discovery document, the product catalog, and the
//! checkout-session lifecycle over REST, with structured logging (tracing)
//! and Prometheus metrics. All protocol rules live in the `checkout` engine;
//! this crate is transport glue.

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::CheckoutService;
use domain::{Catalog, DiscoveryDescriptor};
use metrics_exporter_prometheus::PrometheusHandle;
use session_store::SessionStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::checkout_sessions::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SessionStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/.well-known/discovery.json",
            get(routes::discovery::get::<S>),
        )
        .route("/products", get(routes::products::list::<S>))
        .route(
            "/checkout_sessions",
            post(routes::checkout_sessions::create::<S>),
        )
        .route(
            "/checkout_sessions/{id}",
            get(routes::checkout_sessions::get::<S>),
        )
        .route(
            "/checkout_sessions/{id}/complete",
            post(routes::checkout_sessions::complete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over a catalog and session store.
pub fn create_state<S: SessionStore>(
    catalog: Catalog,
    store: S,
    public_url: impl Into<String>,
) -> Arc<AppState<S>> {
    let catalog = Arc::new(catalog);
    let service = CheckoutService::new(catalog.clone(), store);

    Arc::new(AppState {
        checkout: service,
        catalog,
        descriptor: DiscoveryDescriptor::new(public_url),
    })
}
