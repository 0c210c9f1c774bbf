//! Server host for transport-agnostic API exposure
//!
//! This module provides a `ServerHost` structure that contains all state
//! needed to expose the API. Exposures consume the host and produce a
//! router for their protocol.

use super::state::AppState;
use crate::core::auth::AuthProvider;
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Settings that shape the HTTP surface rather than the data
#[derive(Debug, Clone, Default)]
pub struct HostSettings {
    /// Origin used for hyperlinks; the `Host` header is used when unset
    pub public_url: Option<String>,

    /// CORS origins; empty disables the CORS layer
    pub allowed_origins: Vec<String>,
}

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(builder.build_host()?);
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    /// Store and media handles shared with handlers
    pub state: AppState,

    /// Resolves `Authorization` headers for protected routes
    pub auth_provider: Arc<dyn AuthProvider>,

    /// Entity registry for CRUD routes
    pub entity_registry: EntityRegistry,

    /// Registered modules as `name@version`
    pub modules: Vec<String>,

    pub settings: HostSettings,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_builder_components(
        state: AppState,
        auth_provider: Arc<dyn AuthProvider>,
        entity_registry: EntityRegistry,
        modules: Vec<String>,
        settings: HostSettings,
    ) -> Self {
        Self {
            state,
            auth_provider,
            entity_registry,
            modules,
            settings,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}
