//! Auth API integration tests

mod support;

use http::{Method, StatusCode, header};
use serde_json::json;
use support::{cookie_from, login, request, signup_manager, test_app};

#[tokio::test]
async fn signup_opens_a_manager_session() {
    let app = test_app().await;

    let (status, headers, body) = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "password": "hunter2!",
            "position": "CTO",
            "department": "Engineering",
            "phone": "555-0100",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "Manager");
    assert_eq!(body["email"], "grace@example.com");

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("krill_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn login_accepts_correct_and_rejects_wrong_password() {
    let app = test_app().await;
    signup_manager(&app, "Grace", "grace@example.com", "hunter2!").await;

    let cookie = login(&app, "grace@example.com", "hunter2!").await;
    assert!(cookie.starts_with("krill_session="));

    let (status, _, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1002");

    // Unknown email fails the same way
    let (status, _, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "hunter2!" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1002");
}

#[tokio::test]
async fn me_returns_profile_without_password_hash() {
    let app = test_app().await;
    let (cookie, _) = signup_manager(&app, "Grace", "grace@example.com", "hunter2!").await;

    let (status, _, body) = request(&app, Method::GET, "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grace");
    assert!(body.get("dateJoined").is_some());
    assert!(body.get("hashPass").is_none());
    assert!(body.get("hash_pass").is_none());
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = test_app().await;

    let (status, _, body) = request(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1001");

    let (status, _, _) = request(&app, Method::GET, "/api/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A mangled token is rejected with the token error, not a 500
    let (status, _, body) = request(
        &app,
        Method::GET,
        "/api/auth/me",
        Some("krill_session=not.a.jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E1004");
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, _, body) = request(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = test_app().await;
    let (cookie, _) = signup_manager(&app, "Grace", "grace@example.com", "hunter2!").await;

    let (status, headers, _) =
        request(&app, Method::POST, "/api/auth/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("krill_session=;"));
    assert!(set_cookie.contains("1970"));
    assert_eq!(cookie_from(&headers), "krill_session=");
}

#[tokio::test]
async fn change_password_rotates_credentials() {
    let app = test_app().await;
    let (cookie, _) = signup_manager(&app, "Grace", "grace@example.com", "old-pass").await;

    // Wrong current password is rejected
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&cookie),
        Some(json!({ "currentPassword": "wrong", "newPassword": "new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&cookie),
        Some(json!({ "currentPassword": "old-pass", "newPassword": "new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works, new one does
    let (status, _, _) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "old-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login(&app, "grace@example.com", "new-pass").await;
}

#[tokio::test]
async fn duplicate_signup_email_conflicts() {
    let app = test_app().await;
    signup_manager(&app, "Grace", "grace@example.com", "hunter2!").await;

    let (status, _, body) = request(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Imposter",
            "email": "grace@example.com",
            "password": "other",
            "position": "CTO",
            "department": "Engineering",
            "phone": "555-0199",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}
