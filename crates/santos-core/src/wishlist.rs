//! # Wishlist Set
//!
//! Saved product identifiers, in the order they were saved.
//!
//! The set has exactly one mutator, [`Wishlist::toggle`]. Encoding to and
//! from the stored JSON array lives here too; where that JSON is kept is
//! decided by the storefront's key-value store.

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;

use crate::types::Product;

/// Ordered set of saved product ids. No duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<String>,
}

impl Wishlist {
    /// Creates an empty wishlist.
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Saves the product if absent, forgets it if present.
    ///
    /// Returns `true` when the product is saved after the call.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| *id == product.id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(product.id.clone());
            true
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// Saved ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Encodes the wishlist as a JSON array of ids.
    pub fn to_json(&self) -> Result<String, JsonError> {
        serde_json::to_string(&self.ids)
    }

    /// Decodes a stored JSON array of ids.
    ///
    /// Repeated ids in the stored value are collapsed to their first
    /// occurrence so the no-duplicates invariant holds even for hand-edited
    /// data.
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        let stored: Vec<String> = serde_json::from_str(json)?;
        let mut ids: Vec<String> = Vec::with_capacity(stored.len());
        for id in stored {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(Wishlist { ids })
    }
}
