//! Product catalog.
//!
//! Products are immutable snapshots owned by the catalog; order placement only
//! reads them through [`ProductLookup`].

pub mod catalog;
pub mod product;

pub use catalog::{InMemoryCatalog, ProductLookup};
pub use product::{Product, ProductImage};
