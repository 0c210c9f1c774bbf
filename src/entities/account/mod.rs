//! Accounts, tokens and the public authentication routes

pub mod handlers;
pub mod model;

pub use model::{Account, NewAccount, Token};

use crate::server::state::AppState;
use axum::{Router, routing::post};
use handlers::{login_user, register_user};

/// `POST /register` and `POST /login`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .with_state(state)
}
