use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    account_id: Uuid,
    username: String,
    email: String,
}

impl AccountIdentity {
    /// Creates an account identity from a verified login.
    #[must_use]
    pub fn new(account_id: Uuid, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns the stable account identifier.
    #[must_use]
    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
