// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use stagebook_db::{AppState, DatabaseConfig};
use stagebook_server::config::ServerConfig;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_app_state(db: DatabaseConnection) -> Arc<AppState> {
    Arc::new(AppState { db })
}

/// Router over a fresh in-memory database. The connection is returned too
/// so tests can seed or inspect rows directly.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = stagebook_db::connect(&DatabaseConfig::in_memory())
        .await
        .expect("failed to open in-memory database");
    stagebook_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    let app = stagebook_server::router(test_app_state(db.clone()), &ServerConfig::default());
    (app, db)
}

pub fn days_from_now(days: i64) -> DateTime<FixedOffset> {
    (Utc::now() + Duration::days(days)).fixed_offset()
}

/// `application/x-www-form-urlencoded` body. Values are expected to be
/// free of `&`, `=` and `%`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k}={}", v.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is not JSON")
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .expect("request");
    send(app, request).await
}

pub fn venue_fields<'a>(name: &'a str, city: &'a str, state: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("city", city),
        ("state", state),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz,Reggae"),
        ("seeking_talent", "y"),
    ]
}

pub fn artist_fields(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("genres", "Rock n Roll"),
        ("image_link", "https://img.example.com/band.jpg"),
    ]
}

/// Create a venue through the API and return its id
pub async fn create_venue(app: &Router, name: &str, city: &str, state: &str) -> i64 {
    let (status, body) = post_form(app, "/venues/create", &venue_fields(name, city, state)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().expect("venue id")
}

pub async fn create_artist(app: &Router, name: &str) -> i64 {
    let (status, body) = post_form(app, "/artists/create", &artist_fields(name)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().expect("artist id")
}

pub async fn create_show(app: &Router, venue_id: i64, artist_id: i64, start: DateTime<FixedOffset>) {
    let venue = venue_id.to_string();
    let artist = artist_id.to_string();
    let start = start.format("%Y-%m-%d %H:%M:%S").to_string();
    let (status, body) = post_form(
        app,
        "/shows/create",
        &[
            ("venue_id", venue.as_str()),
            ("artist_id", artist.as_str()),
            ("start_time", start.as_str()),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}
