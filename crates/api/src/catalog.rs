//! Catalog loading: configuration file or built-in seed.
//!
//! Catalog content is loaded once at process start; the running server only
//! reads it.

use std::path::Path;

use domain::{Catalog, CatalogError, CatalogItem, Money};
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Loads a catalog from a JSON file holding an array of items.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let raw = std::fs::read_to_string(path)?;
    let items: Vec<CatalogItem> = serde_json::from_str(&raw)?;
    Ok(Catalog::from_items(items)?)
}

/// The built-in demo catalog used when no `CATALOG_PATH` is configured.
pub fn seed_catalog() -> Catalog {
    let usd = |amount| Money::new(amount, "USD").expect("seed prices are non-negative");

    let items = vec![
        CatalogItem {
            id: "latte".into(),
            title: "Latte".to_string(),
            description: Some("Espresso with steamed milk".to_string()),
            unit_price: usd(550),
            image_url: Some("https://cdn.example.com/img/latte.jpg".to_string()),
            available: true,
        },
        CatalogItem {
            id: "espresso".into(),
            title: "Espresso".to_string(),
            description: None,
            unit_price: usd(350),
            image_url: None,
            available: true,
        },
        CatalogItem {
            id: "cappuccino".into(),
            title: "Cappuccino".to_string(),
            description: Some("Espresso with foamed milk".to_string()),
            unit_price: usd(475),
            image_url: None,
            available: true,
        },
        CatalogItem {
            id: "muffin".into(),
            title: "Blueberry Muffin".to_string(),
            description: None,
            unit_price: usd(325),
            image_url: None,
            available: true,
        },
        CatalogItem {
            id: "seasonal-blend".into(),
            title: "Seasonal Blend (1 lb)".to_string(),
            description: Some("Whole-bean, roasted weekly".to_string()),
            unit_price: usd(1250),
            image_url: None,
            available: false,
        },
    ];

    Catalog::from_items(items).expect("seed catalog ids are unique")
}
