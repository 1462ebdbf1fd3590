//! Cart persistence through a [`KeyValueStore`].
//!
//! Layout: one JSON array under a single key, in cart order:
//!
//! ```text
//! cart = [{"productId": 1, "quantity": 3}, {"productId": 5, "quantity": 1}]
//! ```
//!
//! Only ids and quantities are stored. Names and prices are re-resolved from
//! the catalog on every read so they can never go stale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slumber_core::ProductId;
use slumber_storage::{KeyValueStore, StorageError};

use crate::cart::{Cart, LineItem};

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedLine {
    #[serde(rename = "productId")]
    product_id: ProductId,
    quantity: u32,
}

/// Why a saved cart was discarded on load. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadIssue {
    /// The storage backend could not be read.
    #[error("saved cart could not be read, starting with an empty cart: {0}")]
    Unreadable(String),

    /// The saved value is not a valid cart.
    #[error("saved cart is malformed, starting with an empty cart: {0}")]
    Malformed(String),

    /// Saved lines pointed at products the catalog no longer has; those lines were dropped.
    #[error("saved cart listed products no longer in the catalog ({}); their lines were dropped", join_ids(.0))]
    UnknownProducts(Vec<ProductId>),
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Result of [`CartStore::load`]: always a usable cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub cart: Cart,
    pub issue: Option<LoadIssue>,
}

/// Loads and saves a [`Cart`] under one storage key.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S> CartStore<S>
where
    S: KeyValueStore,
{
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the saved cart. Absent, unreadable or malformed data all yield an
    /// empty cart; the latter two are reported through `Loaded::issue`.
    pub fn load(&self) -> Loaded {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved cart");
                return Loaded {
                    cart: Cart::empty(),
                    issue: None,
                };
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to read saved cart; starting empty");
                return Loaded {
                    cart: Cart::empty(),
                    issue: Some(LoadIssue::Unreadable(err.to_string())),
                };
            }
        };

        match decode(&raw) {
            Ok(cart) => {
                tracing::debug!(key = %self.key, lines = cart.lines().len(), "restored saved cart");
                Loaded { cart, issue: None }
            }
            Err(issue) => {
                tracing::warn!(key = %self.key, %issue, "discarding saved cart; starting empty");
                Loaded {
                    cart: Cart::empty(),
                    issue: Some(issue),
                }
            }
        }
    }

    /// Write the cart. The in-memory cart stays authoritative on failure.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = encode(cart).map_err(|e| StorageError::Encode {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set(&self.key, &raw)
    }
}

/// Serialize a cart to its persisted JSON form.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    let lines: Vec<PersistedLine> = cart
        .lines()
        .iter()
        .map(|l| PersistedLine {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    serde_json::to_string(&lines)
}

/// Parse the persisted JSON form.
pub fn decode(raw: &str) -> Result<Cart, LoadIssue> {
    let lines: Vec<PersistedLine> =
        serde_json::from_str(raw).map_err(|e| LoadIssue::Malformed(e.to_string()))?;

    let lines = lines
        .into_iter()
        .map(|l| LineItem {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    Cart::restore(lines).map_err(|e| LoadIssue::Malformed(e.to_string()))
}
