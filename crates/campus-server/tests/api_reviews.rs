mod common;

use axum::http::StatusCode;
use common::{restaurant_body, setup_app};
use serde_json::json;

fn review_body() -> serde_json::Value {
    json!({
        "service": 5,
        "decor": 3,
        "food": 4,
        "description": "Friendly staff, long lines at noon."
    })
}

#[tokio::test]
async fn created_review_is_embedded_in_restaurant() {
    let app = setup_app();
    let (_, restaurant) = app.post_json("/restaurants/", &restaurant_body(1)).await;
    let id = restaurant["id"].as_i64().unwrap();

    let (status, review) = app
        .post_json(&format!("/restaurant/{id}/reviews/"), &review_body())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["restaurant_id"], id);
    assert_eq!(review["service"], 5);
    assert_eq!(review["decor"], 3);
    assert_eq!(review["food"], 4);
    assert!(review["date_created"].is_string());

    let (status, fetched) = app.get(&format!("/restaurant/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["reviews"], json!([review]));
}

#[tokio::test]
async fn review_for_missing_restaurant_is_404() {
    let app = setup_app();
    let (status, json) = app.post_json("/restaurant/31/reviews/", &review_body()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn review_score_validation() {
    let app = setup_app();
    let (_, restaurant) = app.post_json("/restaurants/", &restaurant_body(1)).await;
    let uri = format!("/restaurant/{}/reviews/", restaurant["id"]);

    let mut missing = review_body();
    missing.as_object_mut().unwrap().remove("food");
    let (status, json) = app.post_json(&uri, &missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("missing field 'food'"));

    let mut out_of_range = review_body();
    out_of_range["decor"] = json!(9);
    let (status, json) = app.post_json(&uri, &out_of_range).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid field 'decor'"));
}
