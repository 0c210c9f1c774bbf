//! Registration and login handlers
//!
//! Both routes are public: they are how a client obtains its token.

use super::model::{Account, NewAccount};
use crate::core::error::{ApiError, ApiResult};
use crate::core::validation::ValidatedJson;
use crate::entities::customer::CustomerFields;
use crate::server::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 150, message = "username must be 1 to 150 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "family_members must not be negative"))]
    pub family_members: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,

    pub password: String,
}

/// Create an account with its Customer profile and return a token
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let password_hash = Account::hash_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;

    let account = state
        .store
        .accounts
        .create(NewAccount::new(
            input.username,
            password_hash,
            input.first_name,
            input.last_name,
            input.email.unwrap_or_default(),
        ))
        .await?;

    let customer = state
        .store
        .customers
        .create(CustomerFields {
            account_id: account.id,
            family_members: input.family_members,
        })
        .await
        .inspect_err(|e| {
            tracing::error!(
                account_id = account.id,
                error = %e,
                "account stored without a customer profile"
            );
        })?;

    let token = state.store.accounts.token_for(account.id).await?;

    tracing::info!(
        account_id = account.id,
        customer_id = customer.id,
        username = %account.username,
        "account registered"
    );

    Ok((StatusCode::CREATED, Json(json!({ "token": token.key }))))
}

/// Check credentials and hand back the account's token
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Some(account) = state
        .store
        .accounts
        .find_by_username(&input.username)
        .await?
    else {
        tracing::debug!(username = %input.username, "login for unknown user");
        return Ok(rejected());
    };

    let valid = account
        .verify_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("stored password hash is unreadable: {}", e)))?;

    if !valid {
        tracing::debug!(username = %input.username, "login with wrong password");
        return Ok(rejected());
    }

    let token = state.store.accounts.token_for(account.id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "valid": true, "token": token.key })),
    ))
}

fn rejected() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "valid": false })))
}
