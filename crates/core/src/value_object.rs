//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are interchangeable. In this workspace `Price` and cart line items
/// are value objects, while catalog products are entities (see [`crate::Entity`]).
///
/// Value objects are immutable; "changing" one means building a new one
/// (a line item with a bumped quantity replaces the old line item).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
