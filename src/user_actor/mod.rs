//! User directory: registration, profile updates, credential checks.

pub mod entity;
pub mod error;

pub use error::*;
