use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{api_error::ApiError, app_state::SharedState, task::Task, task_schema};

pub struct TaskController {}

/// Empty bodies read as `{}`; anything else must be JSON.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Request body is not valid JSON: {e}")))
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::missing_id());
    }
    Ok(id)
}

impl TaskController {
    pub async fn create(
        State(state): State<SharedState>,
        body: Bytes,
    ) -> Result<(StatusCode, Json<Task>), ApiError> {
        let request = task_schema::validate_create(&parse_body(&body)?)?;
        let task = state.task_service.create(request)?;
        Ok((StatusCode::CREATED, Json(task)))
    }

    pub async fn find_all(State(state): State<SharedState>) -> Result<Json<Vec<Task>>, ApiError> {
        Ok(Json(state.task_service.find_all()?))
    }

    pub async fn find_one(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<Task>, ApiError> {
        let id = require_id(&id)?;
        state.task_service.find_one(id)?.map(Json).ok_or(ApiError::NotFound)
    }

    pub async fn update(
        State(state): State<SharedState>,
        Path(id): Path<String>,
        body: Bytes,
    ) -> Result<Json<Task>, ApiError> {
        let id = require_id(&id)?;
        let request = task_schema::validate_update(&parse_body(&body)?)?;
        state.task_service.update(id, request)?.map(Json).ok_or(ApiError::NotFound)
    }

    pub async fn remove(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<StatusCode, ApiError> {
        let id = require_id(&id)?;
        match state.task_service.remove(id)? {
            Some(_) => Ok(StatusCode::NO_CONTENT),
            None => Err(ApiError::NotFound),
        }
    }

    /// `/tasks/` with nothing after the slash.
    pub async fn missing_id() -> ApiError {
        ApiError::missing_id()
    }
}
