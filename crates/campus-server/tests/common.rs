#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use campus_db::DbPool;
use campus_server::config::DatabaseConfig;
use campus_server::{app, init_database, AppState};
use serde_json::Value;
use tempfile::NamedTempFile;
use tower::ServiceExt; // for oneshot

/// A router backed by a fresh on-disk database.
///
/// The temp file must outlive the router, so it travels with it.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _db_file: NamedTempFile,
}

pub fn setup_app() -> TestApp {
    let db_file = NamedTempFile::new().expect("failed to create temp db file");
    let config = DatabaseConfig {
        path: db_file
            .path()
            .to_str()
            .expect("temp path should be utf-8")
            .to_string(),
        ..DatabaseConfig::default()
    };
    let pool = init_database(&config).expect("database should initialize");

    TestApp {
        router: app(AppState { pool: pool.clone() }),
        pool,
        _db_file: db_file,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub fn restaurant_body(location_id: i64) -> Value {
    serde_json::json!({
        "description": "Morrison Dining",
        "location_id": location_id,
        "cuisine": "All-you-care-to-eat",
        "address": "18 Sisson Pl",
        "image": "https://example.com/morrison.jpg"
    })
}
