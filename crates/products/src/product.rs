use serde::{Deserialize, Serialize};

use kart_core::Entity;

/// Image variants for a product, one URL per device class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductImage {
    pub thumbnail: String,
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

/// A sellable product.
///
/// `price` is a plain floating point amount in the store currency; it is never
/// negative for catalog-constructed products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub image: ProductImage,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.max(0.0),
            category: category.into(),
            image: ProductImage::default(),
        }
    }

    pub fn with_image(mut self, image: ProductImage) -> Self {
        self.image = image;
        self
    }

    /// Price of `quantity` units of this product.
    pub fn line_total(&self, quantity: i64) -> f64 {
        self.price * quantity as f64
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
