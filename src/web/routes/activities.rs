use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::Directory;
use crate::services::activities_service;
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    fn require(self) -> Result<String, ApiError> {
        self.email.ok_or(ApiError::MissingQuery("email"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_activities_handler(State(state): State<AppState>) -> Json<Directory> {
    Json(activities_service::list_activities(&state.directory))
}

pub async fn signup_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let email = query?.0.require()?;
    let message =
        activities_service::signup(&state.directory, state.capacity, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}

pub async fn unregister_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let email = query?.0.require()?;
    let message = activities_service::unregister(&state.directory, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}
