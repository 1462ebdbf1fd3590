//! Derived views: recomputed from the cart on every call, never stored.

use serde::Serialize;

use slumber_catalog::{CatalogLookup, Product};
use slumber_core::{Entity, Price, ProductId};

use crate::cart::Cart;

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    pub fn line_total(&self) -> Price {
        self.product.price().times(self.quantity)
    }
}

/// Total number of units in the cart.
pub fn count(cart: &Cart) -> u64 {
    cart.lines().iter().map(|l| u64::from(l.quantity)).sum()
}

/// Sum of price × quantity, with prices looked up now.
///
/// Lines whose product is no longer in the catalog contribute nothing. The
/// engine drops such lines when it opens a saved cart.
pub fn total<C>(cart: &Cart, catalog: &C) -> Price
where
    C: CatalogLookup + ?Sized,
{
    items(cart, catalog).iter().map(CartLine::line_total).sum()
}

/// Cart lines in cart order, joined with the catalog.
pub fn items<'a, C>(cart: &Cart, catalog: &'a C) -> Vec<CartLine<'a>>
where
    C: CatalogLookup + ?Sized,
{
    cart.lines()
        .iter()
        .filter_map(|line| {
            catalog.find_by_id(line.product_id).map(|product| CartLine {
                product,
                quantity: line.quantity,
            })
        })
        .collect()
}

/// Owned snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub count: u64,
    pub total: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

impl Receipt {
    pub fn capture<C>(cart: &Cart, catalog: &C) -> Self
    where
        C: CatalogLookup + ?Sized,
    {
        let lines: Vec<ReceiptLine> = items(cart, catalog)
            .into_iter()
            .map(|line| ReceiptLine {
                product_id: line.product.id(),
                name: line.product.name().to_string(),
                unit_price: line.product.price(),
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();

        Self {
            count: count(cart),
            total: lines.iter().map(|l| l.line_total).sum(),
            lines,
        }
    }
}
