//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use tasklane_application::{AccountRepository, NewAccount};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Account, AccountId, EmailAddress, Username};

/// PostgreSQL implementation of the account repository port.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: AccountLookup, value: String) -> AppResult<Option<Account>> {
        let query = match column {
            AccountLookup::Email => {
                r#"
                SELECT id, email, username, password_hash, is_verified, is_banned
                FROM accounts
                WHERE email = $1
                "#
            }
            AccountLookup::Username => {
                r#"
                SELECT id, email, username, password_hash, is_verified, is_banned
                FROM accounts
                WHERE username = $1
                "#
            }
        };

        let row = sqlx::query_as::<_, AccountRow>(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find account: {error}")))?;

        row.map(Account::try_from).transpose()
    }
}

#[derive(Debug, Clone, Copy)]
enum AccountLookup {
    Email,
    Username,
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: uuid::Uuid,
    email: String,
    username: String,
    password_hash: String,
    is_verified: bool,
    is_banned: bool,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|error| {
            AppError::Internal(format!("invalid email stored for account '{}': {error}", row.id))
        })?;
        let username = Username::new(row.username).map_err(|error| {
            AppError::Internal(format!(
                "invalid username stored for account '{}': {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: AccountId::from_uuid(row.id),
            email,
            username,
            password_hash: row.password_hash,
            is_verified: row.is_verified,
            is_banned: row.is_banned,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Account>> {
        self.find_where(AccountLookup::Email, email.as_str().to_owned())
            .await
    }

    async fn find_by_username(&self, username: &Username) -> AppResult<Option<Account>> {
        self.find_where(AccountLookup::Username, username.as_str().to_owned())
            .await
    }

    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, is_verified, is_banned
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find account: {error}")))?;

        row.map(Account::try_from).transpose()
    }

    async fn create_account(&self, account: NewAccount) -> AppResult<Account> {
        let account_id = AccountId::new();

        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, username, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(account.password_hash.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_account_conflict)?;

        Ok(Account {
            id: account_id,
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            is_verified: false,
            is_banned: false,
        })
    }
}

fn map_account_conflict(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("email or username is already registered".to_owned());
    }

    AppError::Internal(format!("failed to create account: {error}"))
}
