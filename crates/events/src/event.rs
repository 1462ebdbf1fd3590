use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate.
///
/// Cart events describe what a user interaction changed; they are published
/// only after being applied and after the new cart state was saved (or the
/// save failure was recorded).
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name such as `"cart.item_added"`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version for `event_type`.
    fn version(&self) -> u32;

    /// Wall-clock time of the user interaction that produced the event.
    fn occurred_at(&self) -> DateTime<Utc>;
}
