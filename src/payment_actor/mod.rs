//! Payment records plus checkout validation.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;
