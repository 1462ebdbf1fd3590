//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only catalog construction and identifier parsing can fail hard. Cart
/// operations never return this type: their failures degrade to a no-op
/// and are reported through the operation outcome instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty product name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two catalog entries share the same identifier.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// The catalog has no product with this identifier.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
