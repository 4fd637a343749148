use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::ActivityError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    Activity(ActivityError),
    MissingQuery(&'static str),
    /// Malformed path or query string.
    BadRequest(String),
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        ApiError::Activity(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Activity(err) => (err.status(), err.to_string()),
            ApiError::MissingQuery(name) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing required query parameter: {}", name),
            ),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
