use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use serde::de::DeserializeOwned;
use taskcast_server::web::{AppState, create_app};
use tower::ServiceExt;

/// Builds the full application router over a fresh in-memory store. The
/// router is cloned per request, so every clone shares the same storage.
pub fn create_test_app() -> Router {
    create_app(AppState::new())
}

/// Sends a JSON request to the app and returns the raw response.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Sends a bodyless request to the app and returns the raw response.
pub async fn send(app: &Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Reads the response body and decodes it as JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
