//! # Kennywood park planner
//!
//! A token-authenticated REST API for planning a day at the park: park
//! areas, the attractions inside them, and each customer's itinerary.
//!
//! ## Features
//!
//! - **Resources**: `/parkareas`, `/attractions` (filterable by `?area=`),
//!   `/itineraries` (scoped to the caller)
//! - **Hyperlinked views**: every representation carries an absolute `url`;
//!   itineraries nest their attraction and its park area
//! - **Token auth**: `POST /register` and `POST /login` issue tokens sent as
//!   `Authorization: Token <key>`
//! - **Pluggable storage**: SQLite through `sqlx`, or in-memory for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kennywood::prelude::*;
//!
//! let state = AppState::new(EntityStore::in_memory(), MediaStore::new("media"));
//! ServerBuilder::new()
//!     .with_state(state.clone())
//!     .register_module(ParkModule::new(state))
//!     .serve("127.0.0.1:8000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthProvider, TokenAuthProvider},
        entity::Entity,
        error::{ApiError, ApiResult, EntityError, StorageError, ValidationError},
        hyperlink::BaseUrl,
        media::MediaStore,
        module::Module,
        service::{AccountService, DataService},
    };

    // === Entities ===
    pub use crate::entities::{
        ParkModule,
        attraction::{Attraction, AttractionFields},
        customer::{Customer, CustomerFields},
        itinerary::{Itinerary, ItineraryFields},
        park_area::{ParkArea, ParkAreaFields},
    };

    // === Storage ===
    pub use crate::storage::{EntityStore, InMemoryAccountService, InMemoryDataService};
    #[cfg(feature = "sqlite")]
    pub use crate::storage::{SqliteAccountService, SqliteDataService};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};
}
