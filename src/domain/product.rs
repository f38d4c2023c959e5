use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// Represents a product that can be shipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub quantity: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        image: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            price,
            quantity,
        }
    }
}
