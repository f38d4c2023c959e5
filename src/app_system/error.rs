use thiserror::Error;

use crate::auth::{AuthError, SessionError};
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
