//! Task endpoints, dispatched to the task RPC backend.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use relay_clients::{NewTask, TaskChanges, TaskRpc};
use relay_core::{Envelope, TaskId};

use crate::error::ApiError;
use crate::handlers::{base_url, require};
use crate::state::GatewayState;

// =============================================================================
// Request Types
// =============================================================================

/// Request to create a task.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Required, non-blank.
    #[serde(default)]
    pub title: Option<String>,
    /// Defaults to empty.
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to empty.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Partial task update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a task.
///
/// # Errors
///
/// Returns 400 if `title` is missing or blank, otherwise whatever the task
/// backend's fault maps to.
pub async fn create_task<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let Json(body) = payload?;
    let new_task = NewTask {
        title: require("title", body.title)?,
        description: body.description.unwrap_or_default(),
        created_by: body.created_by.unwrap_or_default(),
    };

    let reply = state.tasks.create(new_task).await?;
    let envelope = Envelope::item(reply.task, reply.message, &base_url(&state.config, &headers));

    Ok((StatusCode::CREATED, Json(envelope)))
}

/// List every task.
///
/// # Errors
///
/// Returns an error if the task backend fails.
pub async fn list_tasks<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let reply = state.tasks.list().await?;
    let envelope =
        Envelope::collection(reply.tasks, reply.message, &base_url(&state.config, &headers));

    Ok(Json(envelope))
}

/// Get a single task by ID.
///
/// # Errors
///
/// Returns 400 for a non-integer id and 404 if the task does not exist.
pub async fn get_task<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let task_id = parse_task_id(&task_id)?;
    let reply = state.tasks.get(task_id).await?;
    let envelope = Envelope::item(reply.task, reply.message, &base_url(&state.config, &headers));

    Ok(Json(envelope))
}

/// Apply a partial update to a task.
///
/// # Errors
///
/// Returns 400 for a malformed id or body and 404 if the task does not exist.
pub async fn update_task<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let task_id = parse_task_id(&task_id)?;
    let Json(body) = payload?;
    let changes = TaskChanges {
        title: body.title.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
        status: body.status.unwrap_or_default(),
    };

    let reply = state.tasks.update(task_id, changes).await?;
    let envelope = Envelope::item(reply.task, reply.message, &base_url(&state.config, &headers));

    Ok(Json(envelope))
}

/// Delete a task.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 if the backend reports the delete
/// did not happen.
pub async fn delete_task<R>(
    State(state): State<Arc<GatewayState<R>>>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let task_id = parse_task_id(&task_id)?;
    state.tasks.delete(task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_task_id(s: &str) -> Result<TaskId, ApiError> {
    s.parse()
        .map_err(|_| ApiError::BadRequest(format!("task id must be an integer, got '{s}'")))
}
