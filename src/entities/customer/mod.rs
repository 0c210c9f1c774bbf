//! Customer entity module
//!
//! Customers have no routes of their own; they are created at registration
//! and used to scope itinerary queries.

pub mod model;

pub use model::{Customer, CustomerFields};

use crate::core::auth::AuthContext;
use crate::core::error::{ApiError, ApiResult};
use crate::core::service::DataService;

/// Look up the Customer owned by the authenticated caller
///
/// An account without a Customer is a provisioning fault, not a client error.
pub async fn current_customer(
    customers: &dyn DataService<Customer>,
    context: &AuthContext,
) -> ApiResult<Customer> {
    let account_id = context.require_account()?;

    customers
        .find_by("account_id", account_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            ApiError::Internal(format!("account {} has no customer profile", account_id))
        })
}
