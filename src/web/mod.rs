use std::path::Path;
use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::database::ActivityDirectory;
use crate::services::CapacityPolicy;

pub mod error;
pub mod routes;

use routes::activities;

/// Shared by every handler; cloning only bumps the directory refcount.
#[derive(Debug, Clone)]
pub struct AppState {
    pub directory: Arc<ActivityDirectory>,
    pub capacity: CapacityPolicy,
}

impl AppState {
    pub fn new(directory: ActivityDirectory, capacity: CapacityPolicy) -> Self {
        Self {
            directory: Arc::new(directory),
            capacity,
        }
    }
}

pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let static_dir = static_dir.filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            tracing::warn!(dir = %dir.display(), "static directory not found, not serving /static");
        }
        exists
    });
    let index = if static_dir.is_some() {
        "/static/index.html"
    } else {
        "/activities"
    };

    let mut app = Router::new()
        .route("/", get(move || async move { Redirect::to(index) }))
        .route("/activities", get(activities::list_activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activities::signup_handler),
        )
        .route(
            "/activities/:activity_name/unregister",
            delete(activities::unregister_handler),
        );

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(SetResponseHeaderLayer::if_not_present(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    ))
    .layer(CatchPanicLayer::new())
    .with_state(state)
}
