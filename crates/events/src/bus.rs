//! Notification publishing/subscription abstraction (mechanics only).
//!
//! The cart engine publishes a message after every operation that changed
//! something (and after every failed save). The presentation layer subscribes
//! and shows the messages; nothing in the engine depends on anyone listening.
//!
//! ## Delivery
//!
//! - **Broadcast**: every subscription receives every message published after it subscribed
//! - **In order**: a single publisher's messages arrive in publication order
//! - **No persistence**: messages published with no subscriber are dropped

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to a message stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// engine.add_to_cart(ProductId::new(1));
/// for message in subscription.drain() {
///     println!("{}", message.payload().message(locale));
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Collect every message already delivered, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic pub/sub bus.
///
/// `publish()` can fail (e.g. a poisoned lock). Callers treat that as a lost
/// notification, never as a failed operation.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
