use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CourierId, ProductId, UserId};

pub type OrderId = u64;

/// Lifecycle of a courier booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Outbound edges of the transition table.
    pub fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => &[OrderStatus::Delivered, OrderStatus::Cancelled],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Staying in the same state is always allowed and changes nothing.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self == next || self.successors().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Represents a customer order: one product shipped through one courier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_date: NaiveDate,
    pub amount: f64,
    pub quantity: u32,
    pub customer_id: UserId,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    pub courier_id: CourierId,
    pub courier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_courier_name: Option<String>,
    pub status: OrderStatus,
}

/// What a customer submits when booking a courier.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub courier_id: CourierId,
    pub custom_courier_name: Option<String>,
}

/// Fully resolved order payload, built after the booking has been validated.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_date: NaiveDate,
    pub amount: f64,
    pub quantity: u32,
    pub customer_id: UserId,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: Option<String>,
    pub courier_id: CourierId,
    pub courier_name: String,
    pub custom_courier_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn transition_table_matches_lifecycle() {
        let allowed = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Shipped),
            (Confirmed, Cancelled),
            (Shipped, Delivered),
            (Shipped, Cancelled),
        ];
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = from == to || allowed.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn delivered_and_cancelled_are_terminal() {
        let terminal: Vec<_> = OrderStatus::ALL.into_iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![Delivered, Cancelled]);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Shipped).unwrap(), "\"SHIPPED\"");
        assert_eq!(Cancelled.to_string(), "CANCELLED");
    }
}
