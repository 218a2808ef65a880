use super::*;

const INVALID_CREDENTIALS: &str = "invalid email or password";

impl AccountService {
    /// Authenticates with email and password.
    ///
    /// Unknown emails and wrong passwords produce the same `Unauthorized`
    /// error and still spend one hash computation.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AccountIdentity> {
        let account = match EmailAddress::new(email) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &account.password_hash)?;
        if !password_valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        if account.is_banned {
            return Err(AppError::Forbidden("account is banned".to_owned()));
        }

        Ok(identity_of(&account))
    }

    /// Re-reads the account behind a session principal.
    ///
    /// Deleted accounts are `Unauthorized` and banned ones `Forbidden`, so a
    /// session issued before a ban stops resolving.
    pub async fn current_identity(
        &self,
        identity: &AccountIdentity,
    ) -> AppResult<AccountIdentity> {
        let account = match self
            .find_account(AccountId::from_uuid(identity.account_id()))
            .await
        {
            Ok(account) => account,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized(
                    "session account no longer exists".to_owned(),
                ));
            }
            Err(error) => return Err(error),
        };

        if account.is_banned {
            return Err(AppError::Forbidden("account is banned".to_owned()));
        }

        Ok(identity_of(&account))
    }
}
