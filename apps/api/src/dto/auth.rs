use serde::{Deserialize, Serialize};
use tasklane_core::AccountIdentity;
use ts_rs::TS;

/// Incoming payload for account registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/register-request.ts"
)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Incoming payload for email and password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API representation of an authenticated account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/account-response.ts"
)]
pub struct AccountResponse {
    pub account_id: String,
    pub username: String,
    pub email: String,
}

impl From<AccountIdentity> for AccountResponse {
    fn from(identity: AccountIdentity) -> Self {
        Self {
            account_id: identity.account_id().to_string(),
            username: identity.username().to_owned(),
            email: identity.email().to_owned(),
        }
    }
}
