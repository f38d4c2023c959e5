use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::order_actor::OrderError;
use super::validation::FieldError;

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during payment operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(String),
    #[error("Invalid payment details: {}", describe(.0))]
    InvalidDetails(Vec<FieldError>),
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error("Payment validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<PaymentError>> for PaymentError {
    fn from(err: FrameworkError<PaymentError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => PaymentError::NotFound(id),
            other => PaymentError::ActorCommunicationError(other.to_string()),
        }
    }
}
