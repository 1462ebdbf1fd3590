//! Cart state engine.
//!
//! The cart itself is a deterministic aggregate (no IO). [`CartEngine`] wraps
//! it with a catalog, a storage backend and a notification bus, and is the
//! only type the presentation layer needs to drive.

pub mod cart;
pub mod engine;
pub mod notification;
pub mod store;
pub mod views;

pub use cart::{
    AddItem, Cart, CartCleared, CartCommand, CartEvent, CartRejection, CartState, ClearCart,
    ItemAdded, ItemRemoved, LineItem, RemoveItem,
};
pub use engine::{
    CHECKOUT_PROMPT, CLEAR_PROMPT, CartEngine, CheckoutOutcome, Effect, NoChange, Outcome,
};
pub use notification::{Notification, NotificationEnvelope};
pub use store::{CART_KEY, CartStore, LoadIssue, Loaded};
pub use views::{CartLine, Receipt, ReceiptLine};
