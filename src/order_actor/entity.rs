use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderId, OrderStatus};
use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;

impl Order {
    /// Move to `next` if the transition table allows it. Same-state moves are no-ops.
    fn transition(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    const KIND: &'static str = "order";

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a new Order in `PENDING`.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError("Quantity must be at least 1".to_string()));
        }
        Ok(Self {
            id,
            order_date: params.order_date,
            amount: params.amount,
            quantity: params.quantity,
            customer_id: params.customer_id,
            customer_name: params.customer_name,
            product_id: params.product_id,
            product_name: params.product_name,
            product_image: params.product_image,
            courier_id: params.courier_id,
            courier_name: params.courier_name,
            custom_courier_name: params.custom_courier_name,
            status: OrderStatus::Pending,
        })
    }

    /// Orders are only changed through actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        let previous = self.status;
        match action {
            OrderAction::Transition(next) => self.transition(next)?,
            OrderAction::Confirm => {
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::NotPending(self.status));
                }
                self.transition(OrderStatus::Confirmed)?;
            }
            OrderAction::Cancel => {
                if self.status == OrderStatus::Delivered {
                    return Err(OrderError::CannotCancelDelivered);
                }
                self.transition(OrderStatus::Cancelled)?;
            }
            OrderAction::ConfirmAfterPayment => {
                if self.status == OrderStatus::Pending {
                    self.transition(OrderStatus::Confirmed)?;
                }
            }
        }
        Ok(OrderActionResult {
            order: self.clone(),
            previous,
            changed: previous != self.status,
        })
    }
}
