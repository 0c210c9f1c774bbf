//! Entity descriptor for Itinerary

use super::handlers::{
    create_itinerary, delete_itinerary, delete_itinerary_image, get_itinerary, list_itineraries,
    update_itinerary, upload_itinerary_image,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Descriptor for the Itinerary entity
pub struct ItineraryDescriptor {
    pub state: AppState,
}

impl ItineraryDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ItineraryDescriptor {
    fn entity_type(&self) -> &str {
        "itinerary"
    }

    fn plural(&self) -> &str {
        "itineraries"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/itineraries", get(list_itineraries).post(create_itinerary))
            .route(
                "/itineraries/{id}",
                get(get_itinerary)
                    .put(update_itinerary)
                    .delete(delete_itinerary),
            )
            .route(
                "/itineraries/{id}/image",
                put(upload_itinerary_image).delete(delete_itinerary_image),
            )
            .with_state(self.state.clone())
    }
}
