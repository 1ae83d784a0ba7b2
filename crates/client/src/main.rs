//! Scripted demo client.
//!
//! Walks the whole protocol against a running server: read the discovery
//! document, list products, create a checkout session for the first
//! available product, fetch it back, complete it, then show that a repeat
//! completion is rejected.
//!
//! Set `BASE_URL` to point at a server (default: `http://localhost:3000`).

use anyhow::{Context, Result, ensure};
use reqwest::StatusCode;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = reqwest::Client::new();

    // 1. Discovery
    let discovery: Value = client
        .get(format!("{base_url}/.well-known/discovery.json"))
        .send()
        .await
        .context("fetching discovery document")?
        .error_for_status()?
        .json()
        .await?;
    tracing::info!(
        protocol_version = %discovery["protocol_version"],
        endpoint = %discovery["service_endpoint"],
        "discovered store"
    );

    // 2. Catalog
    let listing: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .context("listing products")?
        .error_for_status()?
        .json()
        .await?;
    let products = listing["products"]
        .as_array()
        .context("products is not an array")?;
    ensure!(!products.is_empty(), "store has no available products");
    tracing::info!(count = %listing["count"], "listed products");

    let product_id = products[0]["id"]
        .as_str()
        .context("product id is not a string")?;
    tracing::info!(product_id, title = %products[0]["title"], "picked product");

    // 3. Create a checkout session
    let response = client
        .post(format!("{base_url}/checkout_sessions"))
        .json(&serde_json::json!({
            "line_items": [{"product_id": product_id, "quantity": 2}]
        }))
        .send()
        .await
        .context("creating checkout session")?;
    ensure!(
        response.status() == StatusCode::CREATED,
        "unexpected status creating session: {}",
        response.status()
    );
    let session: Value = response.json().await?;
    let session_id = session["id"].as_str().context("session id missing")?;
    tracing::info!(
        session_id,
        status = %session["status"],
        amount = %session["total"]["amount"],
        currency = %session["total"]["currency"],
        "created checkout session"
    );

    // 4. Fetch it back
    let fetched: Value = client
        .get(format!("{base_url}/checkout_sessions/{session_id}"))
        .send()
        .await
        .context("fetching checkout session")?
        .error_for_status()?
        .json()
        .await?;
    ensure!(
        fetched["status"] == "incomplete",
        "fresh session is not incomplete: {}",
        fetched["status"]
    );

    // 5. Complete it
    let completed: Value = client
        .post(format!("{base_url}/checkout_sessions/{session_id}/complete"))
        .send()
        .await
        .context("completing checkout session")?
        .error_for_status()?
        .json()
        .await?;
    ensure!(
        completed["status"] == "complete",
        "completion did not report complete: {}",
        completed["status"]
    );
    tracing::info!(session_id, "completed checkout session");

    // 6. A repeat completion must be rejected
    let repeat = client
        .post(format!("{base_url}/checkout_sessions/{session_id}/complete"))
        .send()
        .await
        .context("repeating completion")?;
    ensure!(
        repeat.status() == StatusCode::CONFLICT,
        "repeat completion was not rejected: {}",
        repeat.status()
    );
    let body: Value = repeat.json().await?;
    tracing::info!(error = %body["error"], "repeat completion rejected as expected");

    tracing::info!("demo flow finished");
    Ok(())
}
