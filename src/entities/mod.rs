//! Park entities and the module that wires them into the server

pub mod account;
pub mod attraction;
pub mod customer;
pub mod itinerary;
pub mod park_area;

use crate::core::module::Module;
use crate::server::entity_registry::EntityRegistry;
use crate::server::state::AppState;
use attraction::AttractionDescriptor;
use axum::Router;
use itinerary::ItineraryDescriptor;
use park_area::ParkAreaDescriptor;

/// The park planner module: areas, attractions, itineraries and accounts
pub struct ParkModule {
    state: AppState,
}

impl ParkModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Module for ParkModule {
    fn name(&self) -> &str {
        "kennywood-park"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn entity_types(&self) -> Vec<&str> {
        vec!["parkarea", "attraction", "itinerary"]
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(Box::new(ParkAreaDescriptor::new(self.state.clone())));
        registry.register(Box::new(AttractionDescriptor::new(self.state.clone())));
        registry.register(Box::new(ItineraryDescriptor::new(self.state.clone())));
    }

    fn public_routes(&self) -> Router {
        account::routes(self.state.clone())
    }
}
