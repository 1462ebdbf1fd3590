use serde::{Deserialize, Serialize};

use slumber_core::Locale;
use slumber_events::{Event, EventEnvelope};

use crate::cart::CartEvent;

/// Message published to the presentation layer after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A cart event was applied and saved (or the save failed, see below).
    Cart(CartEvent),
    /// The cart changed in memory but could not be saved.
    SaveFailed { reason: String },
}

/// What actually travels on the bus.
pub type NotificationEnvelope = EventEnvelope<Notification>;

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Cart(event) => event.event_type(),
            Notification::SaveFailed { .. } => "cart.save_failed",
        }
    }

    /// Short user-facing text in `locale`.
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Notification::Cart(CartEvent::ItemAdded(_)), Locale::Ru) => "Товар добавлен в корзину!".to_string(),
            (Notification::Cart(CartEvent::ItemAdded(_)), Locale::En) => "Item added to cart!".to_string(),
            (Notification::Cart(CartEvent::ItemRemoved(_)), Locale::Ru) => "Товар удален из корзины".to_string(),
            (Notification::Cart(CartEvent::ItemRemoved(_)), Locale::En) => "Item removed from cart".to_string(),
            (Notification::Cart(CartEvent::CartCleared(_)), Locale::Ru) => "Корзина очищена".to_string(),
            (Notification::Cart(CartEvent::CartCleared(_)), Locale::En) => "Cart cleared".to_string(),
            (Notification::SaveFailed { reason }, Locale::Ru) => format!("Не удалось сохранить корзину: {reason}"),
            (Notification::SaveFailed { reason }, Locale::En) => format!("Could not save cart: {reason}"),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notification::SaveFailed { .. })
    }
}
