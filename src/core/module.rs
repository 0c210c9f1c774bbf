//! Module system
//!
//! A module groups the entity types of one domain and knows how to
//! register their routes.

use crate::server::entity_registry::EntityRegistry;
use axum::Router;

/// Trait for a service module
pub trait Module: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// Module version
    fn version(&self) -> &str {
        "1.0.0"
    }

    /// List of entity types managed by this module
    fn entity_types(&self) -> Vec<&str>;

    /// Register entities with the entity registry
    ///
    /// Each entity descriptor provides the CRUD routes for that entity.
    /// These routes sit behind token authentication.
    fn register_entities(&self, registry: &mut EntityRegistry);

    /// Routes reachable without a token
    fn public_routes(&self) -> Router {
        Router::new()
    }
}
