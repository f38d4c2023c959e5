use thiserror::Error;

use crate::user_actor::UserError;

/// Failures reading or writing persisted session state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(String),
    #[error("Session data is corrupt: {0}")]
    Corrupt(String),
}

/// Errors that can occur while signing in, registering or editing the profile.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Non-2xx answer; `message` is the backend's `{message}` body when it sent one.
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("Backend unreachable: {0}")]
    Http(String),
    #[error("Unexpected backend response: {0}")]
    Decode(String),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
