//! In-memory implementations of the storage services for testing and development

use crate::core::error::{StorageError, StorageResult};
use crate::core::service::{AccountService, DataService};
use crate::core::Entity;
use crate::entities::account::{Account, NewAccount, Token};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows of one entity type plus the id sequence
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory data service for any [`Entity`]
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Ids start at 1 and are never reused, matching an autoincrement column.
pub struct InMemoryDataService<T: Entity> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T: Entity> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new empty service
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Table<T>>> {
        self.table
            .read()
            .map_err(|e| StorageError::LockPoisoned(format!("{} read: {}", T::resource_name(), e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Table<T>>> {
        self.table
            .write()
            .map_err(|e| StorageError::LockPoisoned(format!("{} write: {}", T::resource_name(), e)))
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted<T: Entity>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by_key(|row| row.sort_key());
    rows
}

fn check_field<T: Entity>(allowed: &[&str], field: &str) -> StorageResult<()> {
    if allowed.contains(&field) {
        Ok(())
    } else {
        Err(StorageError::UnknownField {
            entity_type: T::resource_name_singular(),
            field: field.to_string(),
        })
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, fields: T::Fields) -> StorageResult<T> {
        let mut table = self.write()?;

        let id = table.next_id;
        table.next_id += 1;

        let entity = T::from_parts(id, fields);
        table.rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: i64) -> StorageResult<Option<T>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<T>> {
        let rows = self.read()?.rows.values().cloned().collect();
        Ok(sorted(rows))
    }

    async fn find_by(&self, field: &str, value: i64) -> StorageResult<Vec<T>> {
        check_field::<T>(T::references(), field)?;

        let rows = self
            .read()?
            .rows
            .values()
            .filter(|row| row.reference(field) == Some(value))
            .cloned()
            .collect();

        Ok(sorted(rows))
    }

    async fn update(&self, id: i64, fields: T::Fields) -> StorageResult<Option<T>> {
        let mut table = self.write()?;

        let Some(slot) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        *slot = T::from_parts(id, fields);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    async fn detach(&self, field: &str, value: i64) -> StorageResult<u64> {
        check_field::<T>(T::detachable(), field)?;

        let mut table = self.write()?;
        let mut touched = 0;

        for row in table.rows.values_mut() {
            if row.reference(field) == Some(value) {
                row.detach(field);
                touched += 1;
            }
        }

        Ok(touched)
    }
}

#[derive(Default)]
struct AccountTables {
    accounts: BTreeMap<i64, Account>,
    tokens: HashMap<String, Token>,
    next_id: i64,
}

/// In-memory account and token store
#[derive(Clone)]
pub struct InMemoryAccountService {
    tables: Arc<RwLock<AccountTables>>,
}

impl InMemoryAccountService {
    /// Create a new empty account store
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(AccountTables {
                next_id: 1,
                ..AccountTables::default()
            })),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, AccountTables>> {
        self.tables
            .read()
            .map_err(|e| StorageError::LockPoisoned(format!("accounts read: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, AccountTables>> {
        self.tables
            .write()
            .map_err(|e| StorageError::LockPoisoned(format!("accounts write: {}", e)))
    }
}

impl Default for InMemoryAccountService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountService for InMemoryAccountService {
    async fn create(&self, account: NewAccount) -> StorageResult<Account> {
        let mut tables = self.write()?;

        if tables
            .accounts
            .values()
            .any(|existing| existing.username == account.username)
        {
            return Err(StorageError::Duplicate {
                entity_type: "account",
                message: format!("username '{}' is already taken", account.username),
            });
        }

        let id = tables.next_id;
        tables.next_id += 1;

        let account = account.into_account(id);
        tables.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn get(&self, id: i64) -> StorageResult<Option<Account>> {
        Ok(self.read()?.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<Account>> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn token_for(&self, account_id: i64) -> StorageResult<Token> {
        let mut tables = self.write()?;

        if let Some(token) = tables
            .tokens
            .values()
            .find(|token| token.account_id == account_id)
        {
            return Ok(token.clone());
        }

        let token = Token::generate(account_id);
        tables.tokens.insert(token.key.clone(), token.clone());

        Ok(token)
    }

    async fn resolve_token(&self, key: &str) -> StorageResult<Option<Account>> {
        let tables = self.read()?;

        Ok(tables
            .tokens
            .get(key)
            .and_then(|token| tables.accounts.get(&token.account_id))
            .cloned())
    }
}
