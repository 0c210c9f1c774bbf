//! Entity descriptor for Attraction

use super::handlers::{
    create_attraction, delete_attraction, get_attraction, list_attractions, update_attraction,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Attraction entity
pub struct AttractionDescriptor {
    pub state: AppState,
}

impl AttractionDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for AttractionDescriptor {
    fn entity_type(&self) -> &str {
        "attraction"
    }

    fn plural(&self) -> &str {
        "attractions"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/attractions", get(list_attractions).post(create_attraction))
            .route(
                "/attractions/{id}",
                get(get_attraction)
                    .put(update_attraction)
                    .delete(delete_attraction),
            )
            .with_state(self.state.clone())
    }
}
