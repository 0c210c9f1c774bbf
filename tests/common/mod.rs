//! Test application wiring shared by the HTTP integration tests

#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use kennywood::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

pub struct TestApp {
    pub server: TestServer,
    pub store: EntityStore,
    pub media_dir: TempDir,
}

impl TestApp {
    /// Build the full router over a fresh in-memory store
    pub fn spawn() -> Self {
        Self::spawn_with(|builder| builder)
    }

    pub fn spawn_with(configure: impl FnOnce(ServerBuilder) -> ServerBuilder) -> Self {
        Self::spawn_on(EntityStore::in_memory(), configure)
    }

    /// Same router over a private `sqlite::memory:` database
    #[cfg(feature = "sqlite")]
    pub async fn spawn_sqlite() -> Self {
        let pool = kennywood::storage::sqlite::connect("sqlite::memory:")
            .await
            .expect("in-memory SQLite should open");
        Self::spawn_on(EntityStore::sqlite(pool), |builder| builder)
    }

    fn spawn_on(
        store: EntityStore,
        configure: impl FnOnce(ServerBuilder) -> ServerBuilder,
    ) -> Self {
        let media_dir = tempfile::tempdir().expect("Failed to create media dir");
        let state = AppState::new(store.clone(), MediaStore::new(media_dir.path()));

        let builder = ServerBuilder::new()
            .with_state(state.clone())
            .register_module(ParkModule::new(state));

        let app = configure(builder).build().expect("Failed to build app");
        let server = TestServer::try_new(app).expect("Failed to create test server");

        Self {
            server,
            store,
            media_dir,
        }
    }

    /// Register a user through the API and return its token
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .server
            .post("/register")
            .json(&json!({
                "username": username,
                "password": "Test123",
                "email": format!("{}@park.test", username),
                "first_name": "Test",
                "last_name": "Rider",
                "family_members": 3
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["token"]
            .as_str()
            .expect("register returns a token")
            .to_string()
    }

    pub async fn create_area(&self, token: &str, name: &str) -> Value {
        let response = self
            .server
            .post("/parkareas")
            .add_header(auth_name(), auth(token))
            .json(&json!({ "name": name, "theme": "Classic" }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    pub async fn create_attraction(&self, token: &str, name: &str, area_id: i64) -> Value {
        let response = self
            .server
            .post("/attractions")
            .add_header(auth_name(), auth(token))
            .json(&json!({ "name": name, "area_id": area_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    pub async fn create_itinerary(&self, token: &str, attraction_id: i64, starttime: i64) -> Value {
        let response = self
            .server
            .post("/itineraries")
            .add_header(auth_name(), auth(token))
            .json(&json!({ "starttime": starttime, "attraction_id": attraction_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}

pub fn auth_name() -> HeaderName {
    header::AUTHORIZATION
}

/// `Authorization` header value for a token
pub fn auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Token {}", token)).expect("token is a valid header value")
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("body has an integer id")
}
