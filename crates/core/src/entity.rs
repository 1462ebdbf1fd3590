//! Entity trait: identity that survives attribute changes.

/// Entity marker + minimal interface.
///
/// Catalog lookups index entities by [`Entity::id`].
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
