use crate::actor_framework::Entity;
use crate::domain::{Product, ProductId};
use super::actions::{ProductAction, ProductActionResult};
use super::dtos::{ProductCreate, ProductPatch};
use super::error::ProductError;

const DEFAULT_NAME: &str = "New Product";
const DEFAULT_IMAGE: &str = "/placeholder.svg";

fn check_price(price: f64) -> Result<f64, ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ProductError::ValidationError(format!("Invalid price: {}", price)))
    }
}

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    const KIND: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product, filling unset fields with catalogue defaults.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self {
            id,
            name: params.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            image: params.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            price: check_price(params.price.unwrap_or(0.0))?,
            quantity: params.quantity.unwrap_or(0),
        })
    }

    /// Updates any subset of name, image, price and quantity.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(price) = patch.price {
            self.price = check_price(price)?;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `ReserveStock(amount)`: Decrements stock by the specified amount
    /// - `ReleaseStock(amount)`: Increments stock by the specified amount
    ///
    /// # Errors
    /// Returns an error if attempting to reserve more stock than available,
    /// or if the amount is zero.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(amount) => {
                if self.quantity >= amount {
                    self.quantity -= amount;
                    Ok(ProductActionResult::ReserveStock(self.quantity))
                } else {
                    Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.quantity,
                    })
                }
            }
            ProductAction::ReleaseStock(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(ProductActionResult::ReleaseStock(self.quantity))
            }
        }
    }
}
