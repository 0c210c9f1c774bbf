//! Token authentication for the park API
//!
//! Every resource request carries `Authorization: Token <key>`. The
//! [`require_token`] middleware resolves the key through an
//! [`AuthProvider`] and stores the resulting [`AuthContext`] in the request
//! extensions, where handlers pick it up with `Extension<AuthContext>`.

use crate::core::error::{ApiError, RequestError};
use crate::core::service::AccountService;
use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated account
    User { account_id: i64, username: String },

    /// No authentication (public routes)
    Anonymous,
}

impl AuthContext {
    /// Get the account id if the caller is authenticated
    pub fn account_id(&self) -> Option<i64> {
        match self {
            AuthContext::User { account_id, .. } => Some(*account_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if the caller is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }

    /// Account id of an authenticated caller, or an Unauthorized error
    pub fn require_account(&self) -> Result<i64, ApiError> {
        self.account_id().ok_or_else(|| {
            RequestError::Unauthorized {
                message: "Authentication credentials were not provided".to_string(),
            }
            .into()
        })
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract the auth context from request headers
    ///
    /// Returns `Anonymous` when no credentials are present and an error
    /// when credentials are present but invalid.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, ApiError>;
}

/// Provider resolving `Authorization: Token <key>` headers against stored tokens
pub struct TokenAuthProvider {
    accounts: Arc<dyn AccountService>,
}

impl TokenAuthProvider {
    pub fn new(accounts: Arc<dyn AccountService>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext, ApiError> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };

        let value = value.to_str().map_err(|_| unauthorized("Invalid token header"))?;
        let key = parse_token_header(value)?;

        let account = self
            .accounts
            .resolve_token(key)
            .await?
            .ok_or_else(|| unauthorized("Invalid token"))?;

        Ok(AuthContext::User {
            account_id: account.id,
            username: account.username,
        })
    }
}

/// Parse the value of an `Authorization` header using the `Token` scheme
///
/// The scheme is matched case-insensitively and exactly one credential
/// must follow it.
pub fn parse_token_header(value: &str) -> Result<&str, ApiError> {
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(key), None) if scheme.eq_ignore_ascii_case("token") => Ok(key),
        (Some(scheme), None, _) if scheme.eq_ignore_ascii_case("token") => Err(unauthorized(
            "Invalid token header. No credentials provided",
        )),
        (Some(scheme), Some(_), Some(_)) if scheme.eq_ignore_ascii_case("token") => Err(
            unauthorized("Invalid token header. Token string should not contain spaces"),
        ),
        _ => Err(unauthorized("Unsupported authorization scheme")),
    }
}

/// Middleware rejecting requests without a valid token
pub async fn require_token(
    State(provider): State<Arc<dyn AuthProvider>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = provider.extract_context(req.headers()).await?;

    if !context.is_authenticated() {
        return Err(unauthorized(
            "Authentication credentials were not provided",
        ));
    }

    if let AuthContext::User { username, .. } = &context {
        tracing::trace!(username = %username, "request authenticated");
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> ApiError {
    RequestError::Unauthorized {
        message: message.to_string(),
    }
    .into()
}
