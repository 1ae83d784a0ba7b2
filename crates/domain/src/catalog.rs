//! Product catalog: an ordered, read-only list of sellable items.
//!
//! Catalog content is configuration. It is loaded once at process start and
//! never mutated afterwards; the checkout engine only reads from it.

use std::collections::HashMap;

use common::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

/// Errors from catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two items share the same identifier.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),
}

/// A sellable item. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier, unique across the catalog.
    pub id: ProductId,

    /// Display title, snapshotted onto sessions at checkout time.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price per unit in smallest currency subunits.
    pub unit_price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Whether the item can currently be ordered.
    pub available: bool,
}

/// An ordered collection of catalog items with id lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from items, preserving their order.
    ///
    /// Fails if two items share an identifier.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Looks up an item by identifier.
    pub fn lookup(&self, id: &ProductId) -> Option<&CatalogItem> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Iterates over available items in insertion order.
    ///
    /// The iterator borrows the catalog and may be re-created freely.
    pub fn available(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.available)
    }

    /// Iterates over all items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Returns the total number of items, available or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
