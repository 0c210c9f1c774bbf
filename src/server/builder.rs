//! Fluent assembly of the park API server
//!
//! Modules contribute entity descriptors and public routes; the builder
//! folds them into a [`ServerHost`] and hands that to the REST exposure.

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::{HostSettings, ServerHost};
use super::state::AppState;
use crate::core::auth::{AuthProvider, TokenAuthProvider};
use crate::core::module::Module;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Collects state, modules and host settings, then produces the router
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(EntityStore::in_memory(), MediaStore::new("media"));
/// let app = ServerBuilder::new()
///     .with_state(state.clone())
///     .register_module(ParkModule::new(state))
///     .build()?;
/// ```
pub struct ServerBuilder {
    state: Option<AppState>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    entity_registry: EntityRegistry,
    modules: Vec<Arc<dyn Module>>,
    custom_routes: Vec<Router>,
    settings: HostSettings,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            state: None,
            auth_provider: None,
            entity_registry: EntityRegistry::new(),
            modules: Vec::new(),
            custom_routes: Vec::new(),
            settings: HostSettings::default(),
        }
    }

    /// Set the shared handler state (required)
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Replace the token provider
    ///
    /// Defaults to a [`TokenAuthProvider`] over the state's account store.
    pub fn with_auth_provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Origin used for hyperlinks instead of the request's `Host` header
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.settings.public_url = Some(url.into());
        self
    }

    /// Origins allowed by CORS; no CORS layer is installed when empty
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.settings.allowed_origins = origins;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are public: they are not wrapped by token
    /// authentication.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register a module
    ///
    /// This will:
    /// 1. Register all entities from the module
    /// 2. Collect the module's public routes
    pub fn register_module(mut self, module: impl Module + 'static) -> Self {
        let module = Arc::new(module);

        module.register_entities(&mut self.entity_registry);
        self.custom_routes.push(module.public_routes());

        tracing::debug!(
            module = module.name(),
            version = module.version(),
            entities = ?module.entity_types(),
            "module registered"
        );

        self.modules.push(module);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let state = self
            .state
            .take()
            .ok_or_else(|| anyhow::anyhow!("AppState is required. Call .with_state()"))?;

        let auth_provider = self.auth_provider.take().unwrap_or_else(|| {
            Arc::new(TokenAuthProvider::new(state.store.accounts.clone())) as Arc<dyn AuthProvider>
        });

        let modules = self
            .modules
            .iter()
            .map(|m| format!("{}@{}", m.name(), m.version()))
            .collect();

        Ok(ServerHost::from_builder_components(
            state,
            auth_provider,
            self.entity_registry,
            modules,
            self.settings,
        ))
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - CRUD routes for all registered entities, behind token auth
    /// - Public module routes and custom routes
    /// - Health and media routes
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::MediaStore;
    use crate::entities::ParkModule;
    use crate::storage::EntityStore;

    fn state() -> AppState {
        AppState::new(EntityStore::in_memory(), MediaStore::new("media"))
    }

    #[test]
    fn test_build_without_state_fails() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("AppState is required"));
    }

    #[test]
    fn test_build_host_collects_entities() {
        let state = state();
        let host = ServerBuilder::new()
            .with_state(state.clone())
            .register_module(ParkModule::new(state))
            .build_host()
            .unwrap();

        let mut types = host.entity_types();
        types.sort();
        assert_eq!(types, vec!["attraction", "itinerary", "parkarea"]);
        assert_eq!(host.modules.len(), 1);
        assert!(host.modules[0].starts_with("kennywood-park@"));
    }

    #[test]
    fn test_settings_reach_host() {
        let host = ServerBuilder::new()
            .with_state(state())
            .with_public_url("https://kennywood.example")
            .with_allowed_origins(vec!["http://localhost:3000".to_string()])
            .build_host()
            .unwrap();

        assert_eq!(
            host.settings.public_url.as_deref(),
            Some("https://kennywood.example")
        );
        assert_eq!(host.settings.allowed_origins.len(), 1);
    }

    #[test]
    fn test_build_router() {
        let state = state();
        let router = ServerBuilder::new()
            .with_state(state.clone())
            .register_module(ParkModule::new(state))
            .build();
        assert!(router.is_ok());
    }

    #[test]
    fn test_build_without_modules_serves_health_only() {
        let router = ServerBuilder::new().with_state(state()).build();
        assert!(router.is_ok());
    }
}
