use std::collections::HashMap;
use std::sync::Arc;

use slumber_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{CategoryFilter, Product};
use crate::seed;

/// Read-only product lookup consumed by the cart.
///
/// Implementations must be stable for the lifetime of a cart engine: the
/// cart re-resolves prices through this trait on every read.
pub trait CatalogLookup {
    fn find_by_id(&self, id: ProductId) -> Option<&Product>;

    /// Products in declaration order, optionally restricted to one category.
    fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&Product>;

    /// Like `find_by_id`, but a missing product is an error.
    fn require(&self, id: ProductId) -> DomainResult<&Product> {
        self.find_by_id(id).ok_or(DomainError::ProductNotFound(id))
    }

    fn contains(&self, id: ProductId) -> bool {
        self.find_by_id(id).is_some()
    }
}

impl<C> CatalogLookup for &C
where
    C: CatalogLookup + ?Sized,
{
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }

    fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        (**self).filter_by_category(filter)
    }
}

impl<C> CatalogLookup for Arc<C>
where
    C: CatalogLookup + ?Sized,
{
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }

    fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        (**self).filter_by_category(filter)
    }
}

/// Catalog held entirely in memory, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate ids and blank names.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id(), position).is_some() {
                return Err(DomainError::DuplicateProduct(product.id()));
            }
        }

        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog JSON: {e}")))?;
        Self::new(products)
    }

    /// The storefront's built-in pillow and mattress range.
    pub fn bundled() -> Self {
        let products = seed::products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id(), position))
            .collect();
        Self { products, index }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

impl CatalogLookup for StaticCatalog {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product.category()))
            .collect()
    }
}
