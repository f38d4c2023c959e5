//! Login, registration and the persisted session.
//!
//! [`AuthApi`] talks to the backend and falls back to the in-memory user
//! directory; [`AuthSession`] holds the signed-in user and persists it
//! through a [`SessionStore`].

pub mod api;
pub mod error;
pub mod session;
pub mod store;

pub use api::*;
pub use error::*;
pub use session::*;
pub use store::*;
