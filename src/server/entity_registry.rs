//! Entity registry collecting per-entity route builders

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity
///
/// Each resource (ParkArea, Attraction, Itinerary) implements this trait to
/// provide its list/retrieve/create/update/destroy routes. The returned
/// router must already carry its state.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "parkarea")
    fn entity_type(&self) -> &str;

    /// The plural form used as the URL prefix (e.g., "parkareas")
    fn plural(&self) -> &str;

    /// Build the CRUD routes for this entity
    ///
    /// Should return a Router with routes like:
    /// - GET|POST /{plural}
    /// - GET|PUT|DELETE /{plural}/{id}
    fn build_routes(&self) -> Router;
}

/// Registry for all entities in the application
///
/// Keyed by entity type, so registering the same type twice keeps the
/// latest descriptor.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(
            entity_type = %entity_type,
            plural = descriptor.plural(),
            "entity registered"
        );
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Get all registered entity types, in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// URL prefix of a registered entity type
    pub fn plural_of(&self, entity_type: &str) -> Option<&str> {
        self.descriptors.get(entity_type).map(|d| d.plural())
    }
}
