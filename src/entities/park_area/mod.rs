//! ParkArea entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod view;

pub use descriptor::ParkAreaDescriptor;
pub use model::{ParkArea, ParkAreaFields, ParkAreaInput};
pub use view::ParkAreaView;
