use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Order, OrderId, Product, User};

pub type PaymentId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Card,
    Upi,
    Cash,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMode::Card => f.write_str("CARD"),
            PaymentMode::Upi => f.write_str("UPI"),
            PaymentMode::Cash => f.write_str("CASH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

/// A monetary transaction associated with one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub mode: PaymentMode,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// Payload for recording a payment.
#[derive(Debug, Clone)]
pub struct PaymentCreate {
    pub order_id: OrderId,
    pub mode: PaymentMode,
    pub amount: f64,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub product_name: Option<String>,
}

/// Instrument details entered at checkout.
#[derive(Clone)]
pub enum PaymentDetails {
    Card {
        holder: String,
        number: String,
        expiry: String,
        cvv: String,
    },
    Upi {
        upi_id: String,
    },
    Cash,
}

impl PaymentDetails {
    pub fn mode(&self) -> PaymentMode {
        match self {
            PaymentDetails::Card { .. } => PaymentMode::Card,
            PaymentDetails::Upi { .. } => PaymentMode::Upi,
            PaymentDetails::Cash => PaymentMode::Cash,
        }
    }
}

// Card data stays out of logs.
impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentDetails::Card { number, .. } => {
                let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
                let tail = &digits[digits.len().saturating_sub(4)..];
                write!(f, "Card(****{tail})")
            }
            PaymentDetails::Upi { upi_id } => write!(f, "Upi({upi_id})"),
            PaymentDetails::Cash => f.write_str("Cash"),
        }
    }
}

/// A checkout submission for one order.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: f64,
    pub details: PaymentDetails,
}

/// Everything printed on a payment receipt.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub payment: Payment,
    pub order: Order,
    pub customer: User,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_debug_masks_number() {
        let details = PaymentDetails::Card {
            holder: "A".into(),
            number: "4111 1111 1111 1234".into(),
            expiry: "12/99".into(),
            cvv: "123".into(),
        };
        let shown = format!("{:?}", details);
        assert_eq!(shown, "Card(****1234)");
        assert_eq!(details.mode(), PaymentMode::Card);
    }
}
