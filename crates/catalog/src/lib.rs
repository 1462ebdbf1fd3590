//! Product catalog (read-only lookup).
//!
//! The catalog is loaded once and never mutated; the cart only ever reads
//! from it through [`CatalogLookup`].

pub mod catalog;
pub mod product;
pub mod seed;

pub use catalog::{CatalogLookup, StaticCatalog};
pub use product::{Category, CategoryFilter, Product};
