//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for all entities declared in modules, behind token auth
//! - Public routes such as registration and login
//! - Health and media routes

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::{HostSettings, ServerHost};
pub use state::AppState;
