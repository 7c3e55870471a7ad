//! Shared test harness: in-memory app and request helpers

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use krill_server::api;
use krill_server::core::{Config, ServerState};
use krill_server::db::DbService;

/// Build the full application over an in-memory database
pub async fn test_app() -> Router {
    let db = DbService::memory().await.expect("in-memory database");
    let config = Config::with_overrides("/tmp/krill-test", 0);
    let state = ServerState::with_db(config, db.db);
    api::build_app(&state)
}

/// Send one request and decode the JSON body (Null when empty)
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(req).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, json)
}

/// Pull the `name=value` pair out of the Set-Cookie header
pub fn cookie_from(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("ascii cookie")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

/// Register a manager account; returns its session cookie and profile
pub async fn signup_manager(app: &Router, name: &str, email: &str, password: &str) -> (String, Value) {
    let (status, headers, body) = request(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": password,
            "position": "Team Lead",
            "department": "Engineering",
            "phone": "555-0100",
            "skills": ["planning"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    (cookie_from(&headers), body)
}

/// Create a staff account through the directory API (manager session
/// required); returns the created employee record
pub async fn create_employee(app: &Router, manager_cookie: &str, name: &str, email: &str) -> Value {
    let (status, _, body) = request(
        app,
        Method::POST,
        "/api/employees",
        Some(manager_cookie),
        Some(json!({
            "name": name,
            "email": email,
            "position": "Engineer",
            "department": "Engineering",
            "phone": "555-0101",
            "skills": ["Rust"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "employee create failed: {body}");
    body
}

/// Log in and return the session cookie
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, headers, body) = request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    cookie_from(&headers)
}
