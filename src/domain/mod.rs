pub mod user;
pub mod product;
pub mod courier;
pub mod order;
pub mod payment;

pub use user::*;
pub use product::*;
pub use courier::*;
pub use order::*;
pub use payment::*;
