//! Typed clients over the resource actors. Cross-entity orchestration
//! (booking, payment linkage, receipts) lives here.

#[macro_use]
mod macros;

mod user_client;
mod product_client;
mod order_client;
mod payment_client;

pub use user_client::UserClient;
pub use product_client::ProductClient;
pub use order_client::OrderClient;
pub use payment_client::PaymentClient;
