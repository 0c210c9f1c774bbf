//! Service traits for entity and account storage

use crate::core::Entity;
use crate::core::error::StorageResult;
use crate::entities::account::{Account, NewAccount, Token};
use async_trait::async_trait;

/// Service trait for managing one entity type
///
/// Implementations provide CRUD operations for a specific entity type.
/// Handlers only ever see this trait, so the storage handle is passed in
/// explicitly and can be swapped for the in-memory backend in tests.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new row and return it with its assigned id
    async fn create(&self, fields: T::Fields) -> StorageResult<T>;

    /// Get a row by primary key
    async fn get(&self, id: i64) -> StorageResult<Option<T>>;

    /// List all rows in display order
    async fn list(&self) -> StorageResult<Vec<T>>;

    /// List rows whose foreign key `field` equals `value`, in display order
    async fn find_by(&self, field: &str, value: i64) -> StorageResult<Vec<T>>;

    /// Replace every field of an existing row
    ///
    /// Returns `None` when no row has this id.
    async fn update(&self, id: i64, fields: T::Fields) -> StorageResult<Option<T>>;

    /// Delete a row, returning whether it existed
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Null out the nullable foreign key `field` on every row pointing at `value`
    ///
    /// Returns the number of rows touched.
    async fn detach(&self, field: &str, value: i64) -> StorageResult<u64>;
}

/// Service trait for accounts and their API tokens
///
/// Kept apart from [`DataService`] because accounts are looked up by
/// username and token key rather than by foreign key.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account; a taken username is a `StorageError::Duplicate`
    async fn create(&self, account: NewAccount) -> StorageResult<Account>;

    /// Get an account by id
    async fn get(&self, id: i64) -> StorageResult<Option<Account>>;

    /// Find an account by its unique username
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<Account>>;

    /// Return the account's token, issuing one on first use
    async fn token_for(&self, account_id: i64) -> StorageResult<Token>;

    /// Resolve a token key to the account that owns it
    async fn resolve_token(&self, key: &str) -> StorageResult<Option<Account>>;
}
