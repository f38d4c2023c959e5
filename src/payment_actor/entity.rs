use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Payment, PaymentCreate, PaymentId};
use super::error::PaymentError;

impl Entity for Payment {
    type Id = PaymentId;
    type CreateParams = PaymentCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = PaymentError;

    const KIND: &'static str = "payment";

    fn id(&self) -> &PaymentId {
        &self.id
    }

    /// Records a payment dated now.
    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, PaymentError> {
        if !params.amount.is_finite() || params.amount <= 0.0 {
            return Err(PaymentError::ValidationError(format!(
                "Amount must be greater than zero, got {}",
                params.amount
            )));
        }
        Ok(Self {
            id,
            order_id: params.order_id,
            mode: params.mode,
            amount: params.amount,
            date: Utc::now(),
            status: params.status,
            transaction_id: params.transaction_id,
            product_name: params.product_name,
        })
    }

    /// Payments are immutable once recorded.
    fn on_update(&mut self, _patch: ()) -> Result<(), PaymentError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), PaymentError> {
        Ok(())
    }
}
