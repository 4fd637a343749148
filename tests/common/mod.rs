use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use activities_directory::database::{seed, ActivityDirectory};
use activities_directory::services::CapacityPolicy;
use activities_directory::web::{self, AppState};

pub fn app() -> Router {
    app_with(CapacityPolicy::default())
}

pub fn app_with(capacity: CapacityPolicy) -> Router {
    let directory = ActivityDirectory::new(seed::default_seed());
    web::router(AppState::new(directory, capacity), None)
}

pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[allow(dead_code)]
pub async fn participants(app: &Router, activity: &str) -> Vec<String> {
    let (_, body) = send(app, Method::GET, "/activities").await;
    body[activity]["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
