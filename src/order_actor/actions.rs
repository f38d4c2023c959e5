use crate::domain::{Order, OrderStatus};

/// Status-mutating operations. Every variant is checked against the
/// transition table before anything changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderAction {
    /// Generic move to any status the table allows.
    Transition(OrderStatus),
    /// Admin confirmation; only valid while the order is pending.
    Confirm,
    /// Cancellation; never valid once delivered.
    Cancel,
    /// Side effect of a completed payment: pending orders become confirmed,
    /// anything else is left as-is.
    ConfirmAfterPayment,
}

/// The order after the action, and whether its status actually moved.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderActionResult {
    pub order: Order,
    pub previous: OrderStatus,
    pub changed: bool,
}
