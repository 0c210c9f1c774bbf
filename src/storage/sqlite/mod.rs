//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteDataService<T>` and `SqliteAccountService` backed by a
//! `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (on by default).
//!
//! # Schema
//!
//! Each entity type has its own table with one column per field and real
//! foreign keys. `itinerary.attraction_id` is `ON DELETE SET NULL`, and
//! `attraction.area_id` is `ON DELETE RESTRICT`. Foreign-key enforcement is
//! switched on for every pooled connection.

mod accounts;
mod tables;

pub use accounts::SqliteAccountService;
pub use tables::SqlEntity;

use crate::core::Entity;
use crate::core::error::{StorageError, StorageResult};
use crate::core::service::DataService;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const BACKEND: &str = "SQLite";

// ---------------------------------------------------------------------------
// Connection and schema management
// ---------------------------------------------------------------------------

/// Open a pool for `database_url` and apply the schema.
///
/// In-memory URLs get a single long-lived connection, since every new
/// connection to `sqlite::memory:` would see an empty database.
pub async fn connect(database_url: &str) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| connection_error(&e))?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| connection_error(&e))?;

    ensure_schema(&pool).await?;
    tracing::info!(url = %database_url, "SQLite store ready");

    Ok(pool)
}

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> StorageResult<()> {
    const STATEMENTS: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            date_joined TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS token (
            key TEXT NOT NULL PRIMARY KEY,
            account_id INTEGER NOT NULL UNIQUE REFERENCES account(id) ON DELETE CASCADE,
            created TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL UNIQUE REFERENCES account(id) ON DELETE CASCADE,
            family_members INTEGER NOT NULL DEFAULT 0
        )",
        "CREATE TABLE IF NOT EXISTS park_area (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            theme TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS attraction (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            area_id INTEGER NOT NULL REFERENCES park_area(id) ON DELETE RESTRICT
        )",
        "CREATE INDEX IF NOT EXISTS idx_attraction_area ON attraction (area_id)",
        "CREATE TABLE IF NOT EXISTS itinerary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            starttime INTEGER NOT NULL,
            attraction_id INTEGER NULL REFERENCES attraction(id) ON DELETE SET NULL,
            customer_id INTEGER NOT NULL,
            image TEXT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_itinerary_customer ON itinerary (customer_id)",
    ];

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Query {
                backend: BACKEND,
                message: format!("failed to apply schema: {}", e),
            })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn connection_error(err: &sqlx::Error) -> StorageError {
    StorageError::Connection {
        backend: BACKEND,
        message: err.to_string(),
    }
}

/// Map a driver error, turning unique violations into `Duplicate`
pub(crate) fn query_error(entity_type: &'static str, err: sqlx::Error) -> StorageError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StorageError::Duplicate {
                entity_type,
                message: db_err.message().to_string(),
            };
        }
    }

    StorageError::Query {
        backend: BACKEND,
        message: err.to_string(),
    }
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

// ---------------------------------------------------------------------------
// SqliteDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// let pool = kennywood::storage::sqlite::connect("sqlite://park.db").await?;
/// let areas = SqliteDataService::<ParkArea>::new(pool);
/// let area = areas.create(fields).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteDataService<T> {
    pool: SqlitePool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> SqliteDataService<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl<T: SqlEntity> SqliteDataService<T> {
    fn select_sql(filter: Option<&str>) -> String {
        let mut sql = format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE);
        if let Some(column) = filter {
            sql.push_str(&format!(" WHERE {} = ?", column));
        }
        sql
    }

    fn decode(row: &sqlx::sqlite::SqliteRow) -> StorageResult<T> {
        T::from_row(row).map_err(|e| StorageError::Corrupt {
            entity_type: T::resource_name_singular(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl<T: SqlEntity> DataService<T> for SqliteDataService<T> {
    async fn create(&self, fields: T::Fields) -> StorageResult<T> {
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );

        let result = T::bind_fields(&fields, sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(table = T::TABLE, id, "row inserted");

        Ok(T::from_parts(id, fields))
    }

    async fn get(&self, id: i64) -> StorageResult<Option<T>> {
        let sql = Self::select_sql(Some("id"));

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list(&self) -> StorageResult<Vec<T>> {
        let sql = format!("{} ORDER BY {}", Self::select_sql(None), T::ORDER_BY);

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn find_by(&self, field: &str, value: i64) -> StorageResult<Vec<T>> {
        check_field::<T>(T::references(), field)?;

        let sql = format!("{} ORDER BY {}", Self::select_sql(Some(field)), T::ORDER_BY);

        let rows = sqlx::query(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn update(&self, id: i64, fields: T::Fields) -> StorageResult<Option<T>> {
        let assignments: Vec<String> = T::COLUMNS.iter().map(|c| format!("{} = ?", c)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            T::TABLE,
            assignments.join(", ")
        );

        let result = T::bind_fields(&fields, sqlx::query(&sql))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(T::from_parts(id, fields)))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn detach(&self, field: &str, value: i64) -> StorageResult<u64> {
        check_field::<T>(T::detachable(), field)?;

        let sql = format!(
            "UPDATE {} SET {} = NULL WHERE {} = ?",
            T::TABLE,
            field,
            field
        );

        let result = sqlx::query(&sql)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(T::resource_name_singular(), e))?;

        Ok(result.rows_affected())
    }
}
