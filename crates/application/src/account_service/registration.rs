use tasklane_domain::validate_password;

use super::*;

impl AccountService {
    /// Registers a new account and returns its session principal.
    pub async fn register(&self, params: RegisterParams) -> AppResult<AccountIdentity> {
        let email = EmailAddress::new(params.email)?;
        let username = Username::new(params.username)?;
        validate_password(&params.password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            let _ = self.password_hasher.hash_password(&params.password);
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                username.as_str()
            )));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;
        let account = self
            .repository
            .create_account(NewAccount {
                email,
                username,
                password_hash,
            })
            .await?;

        Ok(identity_of(&account))
    }
}
