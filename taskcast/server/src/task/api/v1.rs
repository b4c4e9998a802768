use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
};
use chrono::Local;
use model::{ErrorResponse, NewTask, Task, TaskStats};
use serde::Deserialize;

use crate::task::TaskService;
use crate::web::AppState;

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    /// Owner whose tasks to list. Kept as a string so a missing or
    /// malformed value maps to the API's own error body.
    #[serde(default)]
    user_id: Option<String>,
}

/// Handler for GET /api/tasks - lists one owner's tasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(
        ("userId" = String, Query, description = "Owner whose tasks to list")
    ),
    responses(
        (status = 200, description = "Tasks belonging to the owner", body = [Task]),
        (status = 400, description = "Missing or invalid userId", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, Json<ErrorResponse>)> {
    let owner_id = parse_id(query.user_id.as_deref(), "Valid userId is required")?;
    let service = TaskService::new(&state.storage);
    Ok(Json(service.tasks_for_owner(owner_id).await))
}

/// Handler for POST /api/tasks - creates a task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation failure", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.storage);
    match service.create_task(payload).await {
        Ok(task) => Ok((StatusCode::CREATED, Json(task))),
        Err(err) => {
            tracing::warn!("Rejected task creation: {}", err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.to_string())),
            ))
        }
    }
}

/// Handler for DELETE /api/tasks/{id} - removes a task.
/// Deleting an id that does not exist is a no-op and still succeeds.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = String, Path, description = "Id of the task to delete")
    ),
    responses(
        (status = 204, description = "Task removed (or was already absent)"),
        (status = 400, description = "Invalid task id", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let task_id = parse_id(Some(id.as_str()), "Valid task ID is required")?;
    let service = TaskService::new(&state.storage);
    service.delete_task(task_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/tasks/stats/{userId} - aggregate statistics for
/// one owner's task set.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks/stats/{userId}",
    params(
        ("userId" = String, Path, description = "Owner whose statistics to compute")
    ),
    responses(
        (status = 200, description = "Statistics for the owner", body = TaskStats),
        (status = 400, description = "Invalid userId", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn task_stats_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<TaskStats>, (StatusCode, Json<ErrorResponse>)> {
    let owner_id = parse_id(Some(user_id.as_str()), "Valid userId is required")?;
    let service = TaskService::new(&state.storage);
    Ok(Json(service.stats_for_owner(owner_id, Local::now()).await))
}

fn parse_id(
    raw: Option<&str>,
    message: &str,
) -> Result<u32, (StatusCode, Json<ErrorResponse>)> {
    raw.and_then(|value| value.parse().ok())
        .ok_or_else(|| (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))))
}

/// Creates the tasks API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/{id}", delete(delete_task_handler))
        .route("/tasks/stats/{userId}", get(task_stats_handler))
        .with_state(state)
}
