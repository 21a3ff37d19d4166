use std::collections::HashMap;
use std::sync::Arc;

use kart_core::Entity;

use crate::product::{Product, ProductImage};

/// Read-only product lookup used by order placement.
///
/// Implementations must tolerate concurrent reads from many in-flight orders.
pub trait ProductLookup: Send + Sync {
    /// Snapshot of the product with `id`, if it exists.
    fn get(&self, id: &str) -> Option<Product>;

    /// All products, in catalog order.
    fn list(&self) -> Vec<Product>;
}

impl<S> ProductLookup for Arc<S>
where
    S: ProductLookup + ?Sized,
{
    fn get(&self, id: &str) -> Option<Product> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }
}

/// Static in-memory catalog.
///
/// Built once and never mutated afterwards, so reads need no locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog from products. A later duplicate id replaces the earlier
    /// entry's lookup but keeps the listing order of first appearance.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            match catalog.index.get(product.id()) {
                Some(&pos) => catalog.products[pos] = product,
                None => {
                    catalog
                        .index
                        .insert(product.id().clone(), catalog.products.len());
                    catalog.products.push(product);
                }
            }
        }
        catalog
    }

    /// The storefront's default product range.
    pub fn with_sample_products() -> Self {
        Self::new(sample_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for InMemoryCatalog {
    fn get(&self, id: &str) -> Option<Product> {
        let found = self.index.get(id).map(|&pos| self.products[pos].clone());
        if found.is_none() {
            tracing::debug!(product_id = id, "product lookup miss");
        }
        found
    }

    fn list(&self) -> Vec<Product> {
        self.products.clone()
    }
}

const IMAGE_BASE: &str = "https://orderfoodonline.deno.dev/public/images";

fn sample_image() -> ProductImage {
    ProductImage {
        thumbnail: format!("{IMAGE_BASE}/image-waffle-thumbnail.jpg"),
        mobile: format!("{IMAGE_BASE}/image-waffle-mobile.jpg"),
        tablet: format!("{IMAGE_BASE}/image-waffle-tablet.jpg"),
        desktop: format!("{IMAGE_BASE}/image-waffle-desktop.jpg"),
    }
}

fn sample_products() -> Vec<Product> {
    [
        ("10", "iPhone 15 Pro", 999.99, "Phone"),
        ("11", "Samsung Galaxy S24", 849.99, "Phone"),
        ("12", "iPad Pro 12.9", 1099.99, "Tablet"),
        ("13", "MacBook Pro 14", 1999.99, "Laptop"),
        ("14", "Dell XPS 13", 1299.99, "Laptop"),
    ]
    .into_iter()
    .map(|(id, name, price, category)| {
        Product::new(id, name, price, category).with_image(sample_image())
    })
    .collect()
}
