//! The fixed set of known accounts.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use shopfront_core::{Email, EmailError, Identity, UserId};

/// A known account with its expected password.
pub struct RosterEntry {
    pub identity: Identity,
    password: SecretString,
}

impl RosterEntry {
    #[must_use]
    pub fn new(identity: Identity, password: impl Into<String>) -> Self {
        Self {
            identity,
            password: SecretString::from(password.into()),
        }
    }

    /// Exact password comparison.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

impl std::fmt::Debug for RosterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterEntry")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Errors loading a roster file.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid roster email {email:?}: {source}")]
    Email {
        email: String,
        #[source]
        source: EmailError,
    },
    #[error("duplicate roster email: {0}")]
    Duplicate(String),
}

/// On-disk shape of one roster entry.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    id: String,
    email: String,
    password: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Known accounts, looked up by normalized email.
#[derive(Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Build a roster from entries.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Duplicate` if two entries share an email.
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self, RosterError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries
                .iter()
                .skip(i + 1)
                .any(|other| other.identity.email == entry.identity.email)
            {
                return Err(RosterError::Duplicate(entry.identity.email.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in demo accounts.
    #[must_use]
    pub fn demo() -> Self {
        let entry = |id: &str, email: &str, password: &str, name: &str| {
            Email::parse(email).ok().map(|email| {
                RosterEntry::new(
                    Identity {
                        id: UserId::new(id),
                        email,
                        display_name: Some(name.to_string()),
                    },
                    password,
                )
            })
        };

        Self {
            entries: [
                entry("1", "demo@example.com", "demo123", "Demo User"),
                entry("2", "jane@example.com", "password123", "Jane Shopper"),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }
    }

    /// Parse a roster from a JSON array of `{id, email, password, displayName?}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, an email is invalid or two
    /// entries share an email.
    pub fn from_json(raw: &str) -> Result<Self, RosterError> {
        let raw_entries: Vec<RawEntry> = serde_json::from_str(raw)?;
        let entries = raw_entries
            .into_iter()
            .map(|raw| {
                let email = Email::parse(&raw.email).map_err(|source| RosterError::Email {
                    email: raw.email.clone(),
                    source,
                })?;
                Ok(RosterEntry::new(
                    Identity {
                        id: UserId::new(raw.id),
                        email,
                        display_name: raw.display_name,
                    },
                    raw.password,
                ))
            })
            .collect::<Result<Vec<_>, RosterError>>()?;
        Self::new(entries)
    }

    /// Entry for `email`, if it is a known account.
    #[must_use]
    pub fn find(&self, email: &Email) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.identity.email == email)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_roster_lookup() {
        let roster = Roster::demo();
        assert_eq!(roster.len(), 2);

        let entry = roster
            .find(&Email::parse("Demo@Example.com").unwrap())
            .unwrap();
        assert_eq!(entry.identity.id, UserId::new("1"));
        assert!(entry.password_matches("demo123"));
        assert!(!entry.password_matches("Demo123"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let roster = Roster::demo();
        let debug = format!("{roster:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("demo123"));
    }

    #[test]
    fn test_from_json() {
        let roster = Roster::from_json(
            r#"[{"id": "a1", "email": "ops@shop.test", "password": "s3cret", "displayName": "Ops"}]"#,
        )
        .unwrap();
        let entry = roster.find(&Email::parse("ops@shop.test").unwrap()).unwrap();
        assert_eq!(entry.identity.display_name.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        assert!(matches!(
            Roster::from_json(r#"[{"id": "1", "email": "nope", "password": "x"}]"#),
            Err(RosterError::Email { .. })
        ));
        assert!(matches!(
            Roster::from_json(
                r#"[{"id": "1", "email": "a@b.c", "password": "x"},
                    {"id": "2", "email": "A@B.C", "password": "y"}]"#
            ),
            Err(RosterError::Duplicate(_))
        ));
        assert!(matches!(Roster::from_json("{}"), Err(RosterError::Json(_))));
    }
}
