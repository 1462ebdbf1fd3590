//! Cart engine: the operation surface used by the presentation layer.
//!
//! Every mutating operation runs the same pipeline:
//!
//! ```text
//! validate (catalog) → Cart::handle → Cart::apply → save → publish
//! ```
//!
//! Operations never fail. Unknown products, absent lines, empty carts and
//! declined confirmations are no-ops reported through [`Effect::Unchanged`];
//! a failed save is reported through [`Outcome::save_error`] and a
//! [`Notification::SaveFailed`] while the in-memory cart keeps the change.

use chrono::Utc;

use slumber_catalog::CatalogLookup;
use slumber_core::{Aggregate, Price, ProductId};
use slumber_events::{EventBus, EventEnvelope, execute};
use slumber_storage::{KeyValueStore, StorageError};

use crate::cart::{AddItem, Cart, CartCommand, CartEvent, CartRejection, CartState, ClearCart, RemoveItem};
use crate::notification::{Notification, NotificationEnvelope};
use crate::store::{CartStore, LoadIssue, Loaded};
use crate::views::{self, CartLine, Receipt};

/// Prompt shown by the caller before emptying a non-empty cart.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the cart?";

/// Prompt shown by the caller before checking out.
pub const CHECKOUT_PROMPT: &str = "Place the order? The cart will be emptied.";

/// What an operation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Added { product_id: ProductId, quantity: u32 },
    Removed { product_id: ProductId },
    Cleared { lines_removed: usize },
    Unchanged(NoChange),
}

/// Why an operation left the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoChange {
    /// The product is not in the catalog.
    UnknownProduct(ProductId),
    /// The product is not in the cart.
    NotInCart(ProductId),
    /// The cart was already empty.
    AlreadyEmpty,
    /// The caller's confirmation gate said no.
    Declined,
    /// The line is at the largest representable quantity.
    QuantityLimit(ProductId),
}

/// Result of a cart operation.
#[derive(Debug)]
#[must_use]
pub struct Outcome {
    pub effect: Effect,
    /// Set when the cart changed but could not be saved.
    pub save_error: Option<StorageError>,
}

impl Outcome {
    fn unchanged(reason: NoChange) -> Self {
        Self {
            effect: Effect::Unchanged(reason),
            save_error: None,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self.effect, Effect::Unchanged(_))
    }

    pub fn is_saved(&self) -> bool {
        self.changed() && self.save_error.is_none()
    }
}

/// Result of [`CartEngine::checkout`].
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Nothing to order; the confirmation gate was not consulted.
    EmptyCart,
    /// The caller declined; the cart is untouched.
    Declined,
    /// The order snapshot; the cart has been emptied.
    Completed { receipt: Receipt, outcome: Outcome },
}

/// Owned cart state plus its collaborators.
///
/// - `C`: catalog lookup (read-only)
/// - `S`: key/value storage for the saved cart
/// - `B`: notification bus
#[derive(Debug)]
pub struct CartEngine<C, S, B> {
    catalog: C,
    store: CartStore<S>,
    bus: B,
    cart: Cart,
    load_issue: Option<LoadIssue>,
    published: u64,
}

impl<C, S, B> CartEngine<C, S, B>
where
    C: CatalogLookup,
    S: KeyValueStore,
    B: EventBus<NotificationEnvelope>,
{
    /// Create an engine and restore the saved cart (empty if none or unusable).
    pub fn open(catalog: C, storage: S, bus: B) -> Self {
        Self::with_store(catalog, CartStore::new(storage), bus)
    }

    pub fn with_store(catalog: C, store: CartStore<S>, bus: B) -> Self {
        let Loaded { mut cart, mut issue } = store.load();

        let dropped = cart.retain_lines(|line| catalog.contains(line.product_id));
        if !dropped.is_empty() {
            let ids: Vec<ProductId> = dropped.iter().map(|line| line.product_id).collect();
            tracing::warn!(?ids, "dropping saved lines for products missing from the catalog");
            if let Err(err) = store.save(&cart) {
                tracing::warn!(error = %err, "pruned cart could not be saved");
            }
            issue = Some(LoadIssue::UnknownProducts(ids));
        }

        tracing::info!(
            lines = cart.lines().len(),
            discarded = issue.is_some(),
            "cart opened"
        );

        Self {
            catalog,
            store,
            bus,
            cart,
            load_issue: issue,
            published: 0,
        }
    }

    /// Add one unit of `product_id`.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Outcome {
        if !self.catalog.contains(product_id) {
            tracing::warn!(%product_id, "ignoring add of unknown product");
            return Outcome::unchanged(NoChange::UnknownProduct(product_id));
        }

        let command = CartCommand::AddItem(AddItem {
            product_id,
            occurred_at: Utc::now(),
        });
        self.dispatch(command, || NoChange::NotInCart(product_id))
    }

    /// Drop the whole line for `product_id`, if present.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Outcome {
        let command = CartCommand::RemoveItem(RemoveItem {
            product_id,
            occurred_at: Utc::now(),
        });
        self.dispatch(command, || NoChange::NotInCart(product_id))
    }

    /// Empty the cart once `confirm` agrees.
    ///
    /// `confirm` receives [`CLEAR_PROMPT`] and is only called for a non-empty cart.
    pub fn clear_cart<F>(&mut self, confirm: F) -> Outcome
    where
        F: FnOnce(&str) -> bool,
    {
        self.clear_with_prompt(CLEAR_PROMPT, confirm)
    }

    /// Snapshot the cart as a receipt and empty it once `confirm` agrees.
    ///
    /// `confirm` receives [`CHECKOUT_PROMPT`]. No order is sent anywhere.
    pub fn checkout<F>(&mut self, confirm: F) -> CheckoutOutcome
    where
        F: FnOnce(&str) -> bool,
    {
        if self.cart.is_empty() {
            tracing::debug!("checkout of empty cart");
            return CheckoutOutcome::EmptyCart;
        }

        let receipt = Receipt::capture(&self.cart, &self.catalog);
        let outcome = self.clear_with_prompt(CHECKOUT_PROMPT, confirm);

        if !outcome.changed() {
            return CheckoutOutcome::Declined;
        }

        tracing::info!(count = receipt.count, total = receipt.total.amount(), "checkout completed");
        CheckoutOutcome::Completed { receipt, outcome }
    }

    pub fn count(&self) -> u64 {
        views::count(&self.cart)
    }

    pub fn total(&self) -> Price {
        views::total(&self.cart, &self.catalog)
    }

    pub fn items(&self) -> Vec<CartLine<'_>> {
        views::items(&self.cart, &self.catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn state(&self) -> CartState {
        self.cart.state()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Why the saved cart was discarded or trimmed at open time, if it was.
    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    fn clear_with_prompt<F>(&mut self, prompt: &str, confirm: F) -> Outcome
    where
        F: FnOnce(&str) -> bool,
    {
        if self.cart.is_empty() {
            tracing::debug!("clear of empty cart");
            return Outcome::unchanged(NoChange::AlreadyEmpty);
        }

        if !confirm(prompt) {
            tracing::debug!("clear declined");
            return Outcome::unchanged(NoChange::Declined);
        }

        let command = CartCommand::ClearCart(ClearCart {
            occurred_at: Utc::now(),
        });
        self.dispatch(command, || NoChange::AlreadyEmpty)
    }

    /// Run a command through the cart and, if it produced events, save and publish.
    fn dispatch(&mut self, command: CartCommand, noop: impl FnOnce() -> NoChange) -> Outcome {
        let events = match execute(&mut self.cart, &command) {
            Ok(events) => events,
            Err(CartRejection::QuantityLimit(product_id)) => {
                tracing::warn!(%product_id, "quantity limit reached");
                return Outcome::unchanged(NoChange::QuantityLimit(product_id));
            }
            Err(rejection) => {
                tracing::warn!(%rejection, "cart rejected command");
                return Outcome::unchanged(noop());
            }
        };

        let Some(last) = events.last() else {
            let reason = noop();
            tracing::debug!(?reason, "cart unchanged");
            return Outcome::unchanged(reason);
        };
        let effect = effect_of(last);

        let save_error = self.store.save(&self.cart).err();
        tracing::info!(
            version = self.cart.version(),
            count = self.count(),
            saved = save_error.is_none(),
            "cart updated"
        );

        for event in &events {
            self.publish(Notification::Cart(event.clone()));
        }
        if let Some(err) = &save_error {
            tracing::warn!(error = %err, "cart changed but could not be saved");
            self.publish(Notification::SaveFailed {
                reason: err.to_string(),
            });
        }

        Outcome { effect, save_error }
    }

    fn publish(&mut self, notification: Notification) {
        self.published += 1;
        let envelope = EventEnvelope::wrap(self.published, notification);
        if let Err(err) = self.bus.publish(envelope) {
            tracing::warn!(error = %err, "notification dropped");
        }
    }
}

fn effect_of(event: &CartEvent) -> Effect {
    match event {
        CartEvent::ItemAdded(e) => Effect::Added {
            product_id: e.product_id,
            quantity: e.quantity,
        },
        CartEvent::ItemRemoved(e) => Effect::Removed {
            product_id: e.product_id,
        },
        CartEvent::CartCleared(e) => Effect::Cleared {
            lines_removed: e.lines_removed,
        },
    }
}
