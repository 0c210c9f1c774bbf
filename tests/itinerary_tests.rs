//! HTTP tests for `/itineraries`

mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

/// Area and attraction ready for itineraries; returns the attraction id
async fn seed_ride(app: &TestApp, token: &str) -> i64 {
    let area = id_of(&app.create_area(token, "Kiddieland").await);
    id_of(&app.create_attraction(token, "Kangaroo", area).await)
}

#[tokio::test]
async fn test_create_itinerary_expands_attraction() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;
    let ride = seed_ride(&app, &token).await;

    let body = app.create_itinerary(&token, ride, 1300).await;

    assert_eq!(body["starttime"], 1300);
    assert_eq!(body["attraction_id"], ride);
    assert_eq!(body["attraction"]["name"], "Kangaroo");
    assert_eq!(body["attraction"]["area"]["name"], "Kiddieland");
    assert!(body["image"].is_null());
    assert!(body["url"].as_str().unwrap().ends_with("/itineraries/1"));
}

#[tokio::test]
async fn test_ride_id_alias_is_accepted() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;
    let ride = seed_ride(&app, &token).await;

    let response = app
        .server
        .post("/itineraries")
        .add_header(auth_name(), auth(&token))
        .json(&json!({ "starttime": 900, "ride_id": ride }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["attraction_id"], ride);
}

#[tokio::test]
async fn test_create_with_missing_attraction_is_not_found() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;

    let response = app
        .server
        .post("/itineraries")
        .add_header(auth_name(), auth(&token))
        .json(&json!({ "starttime": 900, "attraction_id": 31 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_is_ordered_by_starttime() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;
    let ride = seed_ride(&app, &token).await;

    for starttime in [1500, 900, 1200] {
        app.create_itinerary(&token, ride, starttime).await;
    }

    let list: Vec<Value> = app
        .server
        .get("/itineraries")
        .add_header(auth_name(), auth(&token))
        .await
        .json();

    let times: Vec<i64> = list.iter().map(|i| i["starttime"].as_i64().unwrap()).collect();
    assert_eq!(times, vec![900, 1200, 1500]);
}

#[tokio::test]
async fn test_customers_never_see_each_other() {
    let app = TestApp::spawn();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let ride = seed_ride(&app, &alice).await;

    let alices = id_of(&app.create_itinerary(&alice, ride, 1000).await);
    app.create_itinerary(&bob, ride, 1100).await;

    let list: Vec<Value> = app
        .server
        .get("/itineraries")
        .add_header(auth_name(), auth(&bob))
        .await
        .json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["starttime"], 1100);

    let path = format!("/itineraries/{}", alices);

    app.server
        .get(&path)
        .add_header(auth_name(), auth(&bob))
        .await
        .assert_status_not_found();

    app.server
        .put(&path)
        .add_header(auth_name(), auth(&bob))
        .json(&json!({ "starttime": 5, "attraction_id": ride }))
        .await
        .assert_status_not_found();

    app.server
        .delete(&path)
        .add_header(auth_name(), auth(&bob))
        .await
        .assert_status_not_found();

    // Still there for its owner
    app.server
        .get(&path)
        .add_header(auth_name(), auth(&alice))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_and_delete_itinerary() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;
    let ride = seed_ride(&app, &token).await;
    let path = format!("/itineraries/{}", id_of(&app.create_itinerary(&token, ride, 1000).await));

    let response = app
        .server
        .put(&path)
        .add_header(auth_name(), auth(&token))
        .json(&json!({ "starttime": 1430, "attraction_id": ride }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let body: Value = app
        .server
        .get(&path)
        .add_header(auth_name(), auth(&token))
        .await
        .json();
    assert_eq!(body["starttime"], 1430);

    app.server
        .delete(&path)
        .add_header(auth_name(), auth(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&path)
        .add_header(auth_name(), auth(&token))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_account_without_customer_is_server_error() {
    let app = TestApp::spawn();
    let token = app.register("TestUser").await;

    // Drop the customer profile behind the API's back
    let customer = app
        .store
        .customers
        .find_by("account_id", 1)
        .await
        .unwrap()
        .remove(0);
    app.store.customers.delete(customer.id).await.unwrap();

    let response = app
        .server
        .get("/itineraries")
        .add_header(auth_name(), auth(&token))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Internal server error");
}

mod image_tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    #[tokio::test]
    async fn test_upload_serve_and_remove_image() {
        let app = TestApp::spawn();
        let token = app.register("TestUser").await;
        let ride = seed_ride(&app, &token).await;
        let path = format!("/itineraries/{}", id_of(&app.create_itinerary(&token, ride, 1000).await));

        let response = app
            .server
            .put(&format!("{}/image", path))
            .add_header(auth_name(), auth(&token))
            .content_type("image/png")
            .bytes(Bytes::from_static(PNG))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let body: Value = app
            .server
            .get(&path)
            .add_header(auth_name(), auth(&token))
            .await
            .json();
        let url = body["image"].as_str().expect("image url is set").to_string();
        assert!(url.ends_with(".png"));

        let media_path = &url[url.find("/media/").expect("media url")..];
        let served = app.server.get(media_path).await;
        served.assert_status_ok();
        assert_eq!(served.as_bytes().as_ref(), PNG);

        app.server
            .delete(&format!("{}/image", path))
            .add_header(auth_name(), auth(&token))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let body: Value = app
            .server
            .get(&path)
            .add_header(auth_name(), auth(&token))
            .await
            .json();
        assert!(body["image"].is_null());
        app.server.get(media_path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_non_image_upload_is_rejected() {
        let app = TestApp::spawn();
        let token = app.register("TestUser").await;
        let ride = seed_ride(&app, &token).await;
        let path = format!("/itineraries/{}/image", id_of(&app.create_itinerary(&token, ride, 1000).await));

        app.server
            .put(&path)
            .add_header(auth_name(), auth(&token))
            .content_type("text/plain")
            .bytes(Bytes::from_static(b"hello"))
            .await
            .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

        app.server
            .put(&path)
            .add_header(auth_name(), auth(&token))
            .content_type("image/png")
            .bytes(Bytes::new())
            .await
            .assert_status_bad_request();
    }
}
