//! Storage implementations for different backends
//!
//! [`EntityStore`] bundles one service per entity type behind the storage
//! traits, so handlers never know which backend they talk to.

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::{InMemoryAccountService, InMemoryDataService};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteAccountService, SqliteDataService};

use crate::core::error::StorageResult;
use crate::core::service::{AccountService, DataService};
use crate::entities::attraction::Attraction;
use crate::entities::customer::Customer;
use crate::entities::itinerary::Itinerary;
use crate::entities::park_area::ParkArea;
use std::sync::Arc;

/// `database_url` value selecting the in-memory backend
pub const MEMORY_URL: &str = "memory";

/// Handles to every table, shared by all handlers
#[derive(Clone)]
pub struct EntityStore {
    pub accounts: Arc<dyn AccountService>,
    pub customers: Arc<dyn DataService<Customer>>,
    pub park_areas: Arc<dyn DataService<ParkArea>>,
    pub attractions: Arc<dyn DataService<Attraction>>,
    pub itineraries: Arc<dyn DataService<Itinerary>>,
}

impl EntityStore {
    /// Fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountService::new()),
            customers: Arc::new(InMemoryDataService::<Customer>::new()),
            park_areas: Arc::new(InMemoryDataService::<ParkArea>::new()),
            attractions: Arc::new(InMemoryDataService::<Attraction>::new()),
            itineraries: Arc::new(InMemoryDataService::<Itinerary>::new()),
        }
    }

    /// Store over an open SQLite pool whose schema is already applied
    #[cfg(feature = "sqlite")]
    pub fn sqlite(pool: sqlx::SqlitePool) -> Self {
        Self {
            accounts: Arc::new(SqliteAccountService::new(pool.clone())),
            customers: Arc::new(SqliteDataService::<Customer>::new(pool.clone())),
            park_areas: Arc::new(SqliteDataService::<ParkArea>::new(pool.clone())),
            attractions: Arc::new(SqliteDataService::<Attraction>::new(pool.clone())),
            itineraries: Arc::new(SqliteDataService::<Itinerary>::new(pool)),
        }
    }

    /// Open the backend named by `database_url`
    ///
    /// `"memory"` selects the in-memory backend; anything else is handed to
    /// the SQLite driver.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        if database_url == MEMORY_URL {
            tracing::info!("using in-memory store");
            return Ok(Self::in_memory());
        }

        #[cfg(feature = "sqlite")]
        {
            let pool = sqlite::connect(database_url).await?;
            Ok(Self::sqlite(pool))
        }

        #[cfg(not(feature = "sqlite"))]
        {
            Err(crate::core::error::StorageError::Connection {
                backend: "SQLite",
                message: format!(
                    "cannot open '{}': built without the `sqlite` feature",
                    database_url
                ),
            })
        }
    }
}
