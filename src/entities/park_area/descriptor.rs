//! Entity descriptor for ParkArea

use super::handlers::{
    create_park_area, delete_park_area, get_park_area, list_park_areas, update_park_area,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the ParkArea entity
pub struct ParkAreaDescriptor {
    pub state: AppState,
}

impl ParkAreaDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ParkAreaDescriptor {
    fn entity_type(&self) -> &str {
        "parkarea"
    }

    fn plural(&self) -> &str {
        "parkareas"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/parkareas", get(list_park_areas).post(create_park_area))
            .route(
                "/parkareas/{id}",
                get(get_park_area)
                    .put(update_park_area)
                    .delete(delete_park_area),
            )
            .with_state(self.state.clone())
    }
}
