use chrono::{Datelike, NaiveDate};

use crate::domain::{OrderId, PaymentDetails};

/// One-time password accepted by the mock payment gateway.
pub const MOCK_OTP: &str = "123456";

/// Merchant handle used in generated UPI links.
pub const MERCHANT_UPI_ID: &str = "testuser@upi";

/// A single rejected checkout field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Check instrument details as of `today`. Returns every problem, not just the first.
pub fn validate_details(details: &PaymentDetails, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    match details {
        PaymentDetails::Card { holder, number, expiry, cvv } => {
            if holder.trim().is_empty() {
                errors.push(FieldError::new("card_name", "Name required"));
            }
            let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
            if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
                errors.push(FieldError::new("card_number", "Must be 16 digits"));
            }
            match parse_expiry(expiry) {
                None => errors.push(FieldError::new("card_expiry", "MM/YY")),
                Some((month, year)) if (year, month) < (today.year(), today.month()) => {
                    errors.push(FieldError::new("card_expiry", "Expired"))
                }
                Some(_) => {}
            }
            if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
                errors.push(FieldError::new("card_cvv", "Must be 3 digits"));
            }
        }
        PaymentDetails::Upi { upi_id } => {
            if !upi_id.contains('@') {
                errors.push(FieldError::new("upi_id", "Invalid UPI ID"));
            }
        }
        PaymentDetails::Cash => {}
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `MM/YY` to (month, four-digit year).
fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let (mm, yy) = expiry.split_once('/')?;
    if mm.len() != 2 || yy.len() != 2 {
        return None;
    }
    let month: u32 = mm.parse().ok()?;
    let year: i32 = yy.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((month, 2000 + year))
}

pub fn verify_otp(otp: &str) -> bool {
    otp.trim() == MOCK_OTP
}

/// Deep link a UPI app can scan to pay for an order.
pub fn upi_payment_uri(order_id: OrderId, amount: f64) -> String {
    format!(
        "upi://pay?pa={}&pn=PickupKart&am={}&tn=Order%20{}",
        MERCHANT_UPI_ID, amount, order_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn card(number: &str, expiry: &str, cvv: &str) -> PaymentDetails {
        PaymentDetails::Card {
            holder: "Meera Iyer".into(),
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    fn fields(result: Result<(), Vec<FieldError>>) -> Vec<&'static str> {
        result.unwrap_err().into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_card_passes_with_spaces_in_number() {
        assert!(validate_details(&card("4111 1111 1111 1111", "06/25", "123"), today()).is_ok());
    }

    #[test]
    fn card_problems_are_all_reported() {
        let result = validate_details(&card("4111", "13/25", "12"), today());
        assert_eq!(fields(result), vec!["card_number", "card_expiry", "card_cvv"]);
    }

    #[test]
    fn expired_card_is_rejected() {
        let result = validate_details(&card("4111111111111111", "05/25", "123"), today());
        let errors = result.unwrap_err();
        assert_eq!(errors, vec![FieldError::new("card_expiry", "Expired")]);
    }

    #[test]
    fn upi_needs_handle() {
        let bad = PaymentDetails::Upi { upi_id: "meera".into() };
        assert_eq!(fields(validate_details(&bad, today())), vec!["upi_id"]);
        let good = PaymentDetails::Upi { upi_id: "meera@okbank".into() };
        assert!(validate_details(&good, today()).is_ok());
        assert!(validate_details(&PaymentDetails::Cash, today()).is_ok());
    }

    #[test]
    fn otp_and_uri() {
        assert!(verify_otp(" 123456 "));
        assert!(!verify_otp("654321"));
        assert_eq!(
            upi_payment_uri(103, 300.0),
            "upi://pay?pa=testuser@upi&pn=PickupKart&am=300&tn=Order%20103"
        );
    }
}
