//! Account and token tables

use super::query_error;
use crate::core::error::{StorageError, StorageResult};
use crate::core::service::AccountService;
use crate::entities::account::{Account, NewAccount, Token};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const ACCOUNT_COLUMNS: &str = "id, username, password_hash, first_name, last_name, email, date_joined";

/// Account store backed by SQLite
#[derive(Clone, Debug)]
pub struct SqliteAccountService {
    pool: SqlitePool,
}

impl SqliteAccountService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn decode(row: &SqliteRow) -> StorageResult<Account> {
        let decoded = (|| -> Result<Account, sqlx::Error> {
            Ok(Account {
                id: row.try_get("id")?,
                username: row.try_get("username")?,
                password_hash: row.try_get("password_hash")?,
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                email: row.try_get("email")?,
                date_joined: row.try_get("date_joined")?,
            })
        })();

        decoded.map_err(|e| StorageError::Corrupt {
            entity_type: "account",
            message: e.to_string(),
        })
    }

    async fn fetch_token(&self, account_id: i64) -> StorageResult<Option<Token>> {
        let row = sqlx::query("SELECT key, account_id, created FROM token WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("token", e))?;

        row.map(|row| {
            Ok::<_, sqlx::Error>(Token {
                key: row.try_get("key")?,
                account_id: row.try_get("account_id")?,
                created: row.try_get("created")?,
            })
        })
        .transpose()
        .map_err(|e| StorageError::Corrupt {
            entity_type: "token",
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AccountService for SqliteAccountService {
    async fn create(&self, account: NewAccount) -> StorageResult<Account> {
        let result = sqlx::query(
            "INSERT INTO account (username, password_hash, first_name, last_name, email, date_joined)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(account.date_joined)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("account", e))?;

        Ok(account.into_account(result.last_insert_rowid()))
    }

    async fn get(&self, id: i64) -> StorageResult<Option<Account>> {
        let sql = format!("SELECT {} FROM account WHERE id = ?", ACCOUNT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("account", e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<Account>> {
        let sql = format!("SELECT {} FROM account WHERE username = ?", ACCOUNT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("account", e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn token_for(&self, account_id: i64) -> StorageResult<Token> {
        if let Some(token) = self.fetch_token(account_id).await? {
            return Ok(token);
        }

        // A concurrent login may have issued one in between; keep whichever landed first
        let token = Token::generate(account_id);
        sqlx::query("INSERT OR IGNORE INTO token (key, account_id, created) VALUES (?, ?, ?)")
            .bind(&token.key)
            .bind(token.account_id)
            .bind(token.created)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("token", e))?;

        self.fetch_token(account_id)
            .await?
            .ok_or_else(|| StorageError::Query {
                backend: "SQLite",
                message: format!("token for account {} vanished after insert", account_id),
            })
    }

    async fn resolve_token(&self, key: &str) -> StorageResult<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM account WHERE id = (SELECT account_id FROM token WHERE key = ?)",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("account", e))?;

        row.as_ref().map(Self::decode).transpose()
    }
}
