//! Itinerary entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod view;

pub use descriptor::ItineraryDescriptor;
pub use model::{Itinerary, ItineraryFields, ItineraryInput};
pub use view::{ItineraryRenderer, ItineraryView};
