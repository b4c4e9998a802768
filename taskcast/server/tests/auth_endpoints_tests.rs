use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;

use common::{create_test_app, read_json, send_json};

fn registration() -> Value {
    json!({
        "username": "ada",
        "password": "hunter2",
        "name": "Ada Lovelace",
        "email": "ada@example.com"
    })
}

#[tokio::test]
async fn can_register_a_user() {
    let app = create_test_app();

    let response = send_json(&app, "POST", "/api/users/register", registration()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["name"], "Ada Lovelace");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn rejects_a_duplicate_username() {
    let app = create_test_app();
    send_json(&app, "POST", "/api/users/register", registration()).await;

    let mut second = registration();
    second["email"] = json!("other@example.com");
    let response = send_json(&app, "POST", "/api/users/register", second).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["message"], "Username 'ada' is already taken");
}

#[tokio::test]
async fn rejects_a_duplicate_email() {
    let app = create_test_app();
    send_json(&app, "POST", "/api/users/register", registration()).await;

    let mut second = registration();
    second["username"] = json!("grace");
    let response = send_json(&app, "POST", "/api/users/register", second).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["message"], "Email 'ada@example.com' is already registered");
}

#[tokio::test]
async fn can_login_with_valid_credentials() {
    let app = create_test_app();
    send_json(&app, "POST", "/api/users/register", registration()).await;

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({"username": "ada", "password": "hunter2"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "ada");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn can_reject_invalid_credentials() {
    let app = create_test_app();
    send_json(&app, "POST", "/api/users/register", registration()).await;

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({"username": "ada", "password": "wrong"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = read_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn rejects_a_login_for_an_unknown_user() {
    let app = create_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({"username": "nobody", "password": "hunter2"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejects_a_login_with_empty_fields() {
    let app = create_test_app();

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({"username": "", "password": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["message"], "Username and password are required");
}
