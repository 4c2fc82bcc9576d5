use std::fmt;

use serde::{Deserialize, Serialize};

/// A named account holding an opaque secret.
///
/// `name` identifies the account and doubles as the table's partition key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Opaque secret or token value. Never written to logs.
    pub key: String,
    pub description: String,
}

impl Account {
    /// Creates a new account.
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: description.into(),
        }
    }

    /// Sets the description for this account.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("key", &"<redacted>")
            .field("description", &self.description)
            .finish()
    }
}
