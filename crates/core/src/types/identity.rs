//! Authenticated identity types.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email::Email;

/// Opaque identifier of a signed-in user.
///
/// Roster users carry a fixed id; identities fabricated for unregistered
/// emails get [`UserId::from_email`], so the same email always maps to the
/// same id (and therefore the same persisted shop record).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a stable id from an email address (UUID v5 over the
    /// normalized address).
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_str().as_bytes()).to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The principal associated with the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    /// Fabricate an identity for an email that is not on the roster.
    #[must_use]
    pub fn fabricate(email: Email, display_name: Option<String>) -> Self {
        Self {
            id: UserId::from_email(&email),
            email,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
        }
    }

    /// Name to greet the user with: the display name, or the email's local part.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.email.local_part())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricated_id_is_deterministic() {
        let a = Identity::fabricate(Email::parse("shopper@example.com").unwrap(), None);
        let b = Identity::fabricate(Email::parse("SHOPPER@example.com").unwrap(), None);
        let c = Identity::fabricate(Email::parse("other@example.com").unwrap(), None);

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_blank_display_name_is_dropped() {
        let identity = Identity::fabricate(
            Email::parse("shopper@example.com").unwrap(),
            Some("  ".to_string()),
        );
        assert_eq!(identity.display_name, None);
        assert_eq!(identity.greeting_name(), "shopper");
    }

    #[test]
    fn test_json_shape() {
        let identity = Identity {
            id: UserId::new("1"),
            email: Email::parse("demo@example.com").unwrap(),
            display_name: Some("Demo User".to_string()),
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "email": "demo@example.com",
                "displayName": "Demo User"
            })
        );
    }
}
