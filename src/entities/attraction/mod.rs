//! Attraction entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod view;

pub use descriptor::AttractionDescriptor;
pub use model::{Attraction, AttractionFields, AttractionInput, AttractionQuery};
pub use view::{AttractionDetailView, AttractionView};
