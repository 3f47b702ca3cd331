//! Session store.
//!
//! Holds at most one signed-in [`Identity`] and mirrors it to the
//! `currentUser` storage record so it survives restarts.
//!
//! Credentials are checked against a fixed [`Roster`]. Emails that are not on
//! the roster are governed by [`UnknownEmailPolicy`]: the default demo policy
//! accepts them with any password and fabricates an identity whose id is
//! derived from the email.

mod error;
mod roster;

pub use error::AuthError;
pub use roster::{Roster, RosterEntry, RosterError};

use std::sync::Arc;

use tracing::instrument;

use shopfront_core::{Email, Identity};

use crate::storage::{KeyValueStore, keys, load_json, save_json};

/// What to do when someone logs in with an email that is not on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownEmailPolicy {
    /// Accept any password and fabricate an identity (demo behavior).
    #[default]
    Accept,
    /// Fail with [`AuthError::InvalidCredentials`].
    Reject,
}

/// Holds the current identity and its persisted record.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    roster: Roster,
    policy: UnknownEmailPolicy,
    current: Option<Identity>,
}

impl SessionStore {
    /// Create the store and restore the persisted session, if any.
    ///
    /// A persisted record that does not decode is discarded.
    #[must_use]
    pub fn restore(
        storage: Arc<dyn KeyValueStore>,
        roster: Roster,
        policy: UnknownEmailPolicy,
    ) -> Self {
        let current = load_json::<Identity>(storage.as_ref(), keys::CURRENT_USER);
        if let Some(identity) = &current {
            tracing::debug!(user_id = %identity.id, "Restored session");
        }

        Self {
            storage,
            roster,
            policy,
            current,
        }
    }

    /// The signed-in identity.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn policy(&self) -> UnknownEmailPolicy {
        self.policy
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed, and
    /// `AuthError::InvalidCredentials` if the password does not match a
    /// roster entry or the email is unknown under [`UnknownEmailPolicy::Reject`].
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = Email::parse(email)?;

        let identity = match self.roster.find(&email) {
            Some(entry) if entry.password_matches(password) => entry.identity.clone(),
            Some(_) => return Err(AuthError::InvalidCredentials),
            None => self.fabricate(email, None)?,
        };

        self.set_current(identity.clone());
        Ok(identity)
    }

    /// Register a new account.
    ///
    /// Registering a roster email with its correct password signs that
    /// account in; any other password is a conflict.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed,
    /// `AuthError::UserAlreadyExists` for a roster email with the wrong
    /// password, and `AuthError::InvalidCredentials` for new emails under
    /// [`UnknownEmailPolicy::Reject`].
    #[instrument(skip(self, password))]
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError> {
        let email = Email::parse(email)?;

        let identity = match self.roster.find(&email) {
            Some(entry) if entry.password_matches(password) => entry.identity.clone(),
            Some(_) => return Err(AuthError::UserAlreadyExists),
            None => self.fabricate(email, display_name)?,
        };

        self.set_current(identity.clone());
        Ok(identity)
    }

    /// Clear the session and its persisted record.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            tracing::info!(user_id = %identity.id, "Logged out");
        }
        if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
    }

    fn fabricate(
        &self,
        email: Email,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError> {
        match self.policy {
            UnknownEmailPolicy::Accept => Ok(Identity::fabricate(email, display_name)),
            UnknownEmailPolicy::Reject => Err(AuthError::InvalidCredentials),
        }
    }

    fn set_current(&mut self, identity: Identity) {
        if let Err(e) = save_json(self.storage.as_ref(), keys::CURRENT_USER, &identity) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
        tracing::info!(user_id = %identity.id, "Logged in");
        self.current = Some(identity);
    }
}
