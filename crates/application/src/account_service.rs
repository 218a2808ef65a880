//! Account ports and application service.
//!
//! Owns registration, password authentication and account lookup. Failed
//! logins share one generic message so callers cannot enumerate accounts.

use std::sync::Arc;

use async_trait::async_trait;

use tasklane_core::{AccountIdentity, AppError, AppResult};
use tasklane_domain::{Account, AccountId, EmailAddress, Username};

mod login;
mod registration;


/// Validated fields of an account about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Canonical email address.
    pub email: EmailAddress,
    /// Unique username.
    pub username: Username,
    /// Argon2id password hash.
    pub password_hash: String,
}

/// Repository port for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by canonical email.
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Account>>;

    /// Finds an account by username.
    async fn find_by_username(&self, username: &Username) -> AppResult<Option<Account>>;

    /// Finds an account by id.
    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>>;

    /// Stores a new account and returns it.
    async fn create_account(&self, account: NewAccount) -> AppResult<Account>;
}

/// Port for password hashing so the application stays free of crypto crates.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Parameters for account registration.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Email address for the new account.
    pub email: String,
    /// Requested username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Application service for account registration and authentication.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// Returns one account by id.
    pub async fn find_account(&self, account_id: AccountId) -> AppResult<Account> {
        self.repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account '{account_id}' was not found")))
    }
}

/// Builds the session principal of an account.
#[must_use]
pub fn identity_of(account: &Account) -> AccountIdentity {
    AccountIdentity::new(
        account.id.as_uuid(),
        account.username.as_str(),
        account.email.as_str(),
    )
}
