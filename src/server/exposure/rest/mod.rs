//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`:
//! entity routes behind token authentication, public routes beside them,
//! uploaded media served from disk, and the tracing and CORS layers around
//! everything.

use super::super::host::{HostSettings, ServerHost};
use crate::core::auth::require_token;
use crate::core::hyperlink::PublicUrl;
use anyhow::{Context, Result};
use axum::{Extension, Json, Router, http::HeaderValue, middleware, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - Entity CRUD routes (token required)
    /// - Custom and module public routes
    /// - `/media` file serving
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let health_routes = Self::health_routes(host.modules.clone());

        let mut app = health_routes;

        // route_layer keeps unknown paths at 404 instead of 401; axum
        // refuses it on a router without routes
        if !host.entity_registry.is_empty() {
            let entity_routes = host
                .entity_registry
                .build_routes()
                .route_layer(middleware::from_fn_with_state(
                    host.auth_provider.clone(),
                    require_token,
                ));
            app = app.merge(entity_routes);
        }

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app = app.nest_service("/media", ServeDir::new(host.state.media.root()));

        if let Some(url) = &host.settings.public_url {
            app = app.layer(Extension(PublicUrl(url.clone())));
        }

        if let Some(cors) = Self::cors_layer(&host.settings)? {
            app = app.layer(cors);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    fn cors_layer(settings: &HostSettings) -> Result<Option<CorsLayer>> {
        if settings.allowed_origins.is_empty() {
            return Ok(None);
        }

        let origins = settings
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        ))
    }

    /// Build health check routes
    fn health_routes(modules: Vec<String>) -> Router {
        let handler = move || Self::health_check(modules.clone());

        Router::new()
            .route("/health", get(handler.clone()))
            .route("/healthz", get(handler))
    }

    /// Health check endpoint handler
    async fn health_check(modules: Vec<String>) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "kennywood-api",
            "modules": modules
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::TokenAuthProvider;
    use crate::core::media::MediaStore;
    use crate::server::entity_registry::EntityRegistry;
    use crate::server::state::AppState;
    use crate::storage::EntityStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn host(settings: HostSettings) -> Arc<ServerHost> {
        let store = EntityStore::in_memory();
        let auth = Arc::new(TokenAuthProvider::new(store.accounts.clone()));
        let state = AppState::new(store, MediaStore::new("media"));
        Arc::new(ServerHost::from_builder_components(
            state,
            auth,
            EntityRegistry::new(),
            vec!["kennywood-park@1.0.0".to_string()],
            settings,
        ))
    }

    #[tokio::test]
    async fn test_router_without_entities() {
        let router = RestExposure::build_router(host(HostSettings::default()), vec![]).unwrap();

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/parkareas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_for_allowed_origin() {
        let settings = HostSettings {
            public_url: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };
        let router = RestExposure::build_router(host(settings), vec![]).unwrap();

        let response = router
            .oneshot(
                Request::get("/healthz")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let settings = HostSettings {
            public_url: None,
            allowed_origins: vec!["bad\norigin".to_string()],
        };
        assert!(RestExposure::build_router(host(settings), vec![]).is_err());
    }
}
