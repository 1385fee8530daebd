mod common;

use axum::http::StatusCode;
use common::{restaurant_body, setup_app};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = setup_app();
    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn list_locations_returns_seeded_rows() {
    let app = setup_app();
    let (status, json) = app.get("/locations/").await;
    assert_eq!(status, StatusCode::OK);

    let locations = json["locations"].as_array().expect("locations array");
    let names: Vec<&str> = locations
        .iter()
        .map(|l| l["name"].as_str().expect("name string"))
        .collect();
    assert_eq!(
        names,
        [
            "North Campus",
            "West Campus",
            "Central Campus",
            "Central Campus",
            "Downtown",
            "Other",
        ]
    );
    assert_eq!(locations[0]["id"], 1);
}

#[tokio::test]
async fn restaurants_for_unknown_location_is_404() {
    let app = setup_app();
    let (status, json) = app.get("/restaurants/99/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn restaurants_for_empty_location_is_empty_list() {
    let app = setup_app();
    let (status, json) = app.get("/restaurants/6/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["restaurants"], serde_json::json!([]));
}

#[tokio::test]
async fn restaurants_are_grouped_by_location() {
    let app = setup_app();
    let (status, first) = app.post_json("/restaurants/", &restaurant_body(2)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.post_json("/restaurants/", &restaurant_body(3)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = app.post_json("/restaurants/", &restaurant_body(2)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = app.get("/restaurants/2/").await;
    assert_eq!(status, StatusCode::OK);

    let restaurants = json["restaurants"].as_array().expect("restaurants array");
    assert_eq!(restaurants.len(), 2);
    assert_eq!(restaurants[0]["id"], first["id"]);
    assert_eq!(restaurants[1]["id"], second["id"]);
    assert_eq!(restaurants[0]["reviews"], serde_json::json!([]));
}
