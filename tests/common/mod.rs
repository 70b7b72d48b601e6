#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use jobtracker::{
    app::build_app,
    config::{AppConfig, JwtConfig},
    db,
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";

pub fn test_config(secret: &str) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        jwt: JwtConfig {
            secret: secret.into(),
            issuer: "jobtracker".into(),
            audience: "jobtracker-users".into(),
            ttl_minutes: 30,
        },
        host: "127.0.0.1".into(),
        port: 0,
    }
}

/// One connection only: every connection to `sqlite::memory:` is a new database.
pub async fn create_test_app_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    db::migrate(&pool).await.expect("migrations");
    AppState::from_parts(pool, Arc::new(test_config(TEST_SECRET)))
}

pub async fn create_test_app() -> (Router, AppState) {
    let state = create_test_app_state().await;
    (build_app(state.clone()), state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };
    TestResponse {
        status,
        headers,
        json,
    }
}

pub async fn register(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers the user and returns (user id, access token).
pub async fn create_test_user(app: &Router, email: &str) -> (i64, String) {
    let res = register(app, email, "hunter2").await;
    assert_eq!(res.status, StatusCode::OK, "register {}", email);
    let id = res.json["id"].as_i64().unwrap();

    let res = login(app, email, "hunter2").await;
    assert_eq!(res.status, StatusCode::OK, "login {}", email);
    let token = res.json["access_token"].as_str().unwrap().to_string();
    (id, token)
}

pub async fn create_test_application(app: &Router, token: &str, role: &str, company: &str) -> Value {
    let res = send(
        app,
        Method::POST,
        "/applications",
        Some(token),
        Some(json!({
            "role": role,
            "company": company,
            "date_applied": "2024-03-01",
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.json
}
