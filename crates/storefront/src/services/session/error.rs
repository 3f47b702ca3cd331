//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login and registration.
///
/// None of these are fatal: the caller shows the message and the user tries
/// again. A failed attempt never changes the current session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopfront_core::EmailError),

    /// Wrong password for a roster email, or an unknown email while unknown
    /// logins are rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted for a roster email with a different password.
    #[error("user already exists")]
    UserAlreadyExists,
}
