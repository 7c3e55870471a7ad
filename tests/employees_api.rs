//! Employee directory API integration tests

mod support;

use http::{Method, StatusCode};
use serde_json::json;
use support::{create_employee, login, request, signup_manager, test_app};

#[tokio::test]
async fn directory_create_yields_employee_with_default_password() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Grace", "grace@example.com", "pw").await;

    let employee = create_employee(&app, &manager, "Bob", "bob@example.com").await;
    assert_eq!(employee["role"], "Employee");
    assert_eq!(employee["skills"], json!(["Rust"]));
    assert!(employee.get("hashPass").is_none());

    // The fixed starting password works until the employee changes it
    login(&app, "bob@example.com", "123456").await;
}

#[tokio::test]
async fn listing_is_open_to_all_roles_and_ordered_by_name() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Zoe", "zoe@example.com", "pw").await;
    create_employee(&app, &manager, "Bob", "bob@example.com").await;
    create_employee(&app, &manager, "Alice", "alice@example.com").await;
    let bob = login(&app, "bob@example.com", "123456").await;

    let (status, _, body) = request(&app, Method::GET, "/api/employees", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Zoe"]);
}

#[tokio::test]
async fn directory_writes_are_manager_only() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Grace", "grace@example.com", "pw").await;
    let bob = create_employee(&app, &manager, "Bob", "bob@example.com").await;
    let bob_id = bob["id"].as_str().unwrap().to_string();
    let bob_cookie = login(&app, "bob@example.com", "123456").await;

    let (status, _, body) = request(
        &app,
        Method::POST,
        "/api/employees",
        Some(&bob_cookie),
        Some(json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "position": "Engineer",
            "department": "Engineering",
            "phone": "555-0102",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    let uri = format!("/api/employees/{bob_id}");
    let (status, _, _) = request(
        &app,
        Method::PUT,
        &uri,
        Some(&bob_cookie),
        Some(json!({ "position": "Principal" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = request(&app, Method::DELETE, &uri, Some(&bob_cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn partial_update_touches_only_sent_fields() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Grace", "grace@example.com", "pw").await;
    let bob = create_employee(&app, &manager, "Bob", "bob@example.com").await;
    let uri = format!("/api/employees/{}", bob["id"].as_str().unwrap());

    let (status, _, updated) = request(
        &app,
        Method::PUT,
        &uri,
        Some(&manager),
        Some(json!({ "position": "Senior Engineer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["position"], "Senior Engineer");
    assert_eq!(updated["name"], "Bob");
    assert_eq!(updated["email"], "bob@example.com");
    assert_eq!(updated["role"], "Employee");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Grace", "grace@example.com", "pw").await;
    create_employee(&app, &manager, "Bob", "bob@example.com").await;
    let alice = create_employee(&app, &manager, "Alice", "alice@example.com").await;

    // Creating with a taken email
    let (status, _, body) = request(
        &app,
        Method::POST,
        "/api/employees",
        Some(&manager),
        Some(json!({
            "name": "Bob Again",
            "email": "bob@example.com",
            "position": "Engineer",
            "department": "Engineering",
            "phone": "555-0103",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    // Updating onto a taken email
    let uri = format!("/api/employees/{}", alice["id"].as_str().unwrap());
    let (status, _, _) = request(
        &app,
        Method::PUT,
        &uri,
        Some(&manager),
        Some(json!({ "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deleting_an_employee_invalidates_their_session() {
    let app = test_app().await;
    let (manager, _) = signup_manager(&app, "Grace", "grace@example.com", "pw").await;
    let bob = create_employee(&app, &manager, "Bob", "bob@example.com").await;
    let bob_id = bob["id"].as_str().unwrap().to_string();
    let bob_cookie = login(&app, "bob@example.com", "123456").await;

    let uri = format!("/api/employees/{bob_id}");
    let (status, _, body) = request(&app, Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    // The token is still signed and unexpired, but the account is gone
    let (status, _, _) = request(&app, Method::GET, "/api/tasks", Some(&bob_cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Deleting again reports not found
    let (status, _, body) = request(&app, Method::DELETE, &uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}
